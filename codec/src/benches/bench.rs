use criterion::criterion_main;
use weft_codec::{
    types::{primitives::I32, text::Text},
    CodecExt, Record, RecordBuilder,
};

mod record;

criterion_main!(list::benches, record::benches);

/// A flat value with a variable-length field.
#[derive(Clone, Debug, PartialEq)]
struct Person {
    name: String,
    age: i32,
    tags: Vec<i32>,
}

/// Builds the record codec used by the record benchmarks.
fn person_codec() -> Record<Person> {
    let mut builder = RecordBuilder::new("person");
    let name = builder.field("name", Text::new());
    let age = builder.field("age", I32);
    let tags = builder.field("tags", I32.list());
    builder.build(
        move |fields| {
            Ok(Person {
                name: fields.take(&name)?,
                age: fields.take(&age)?,
                tags: fields.take(&tags)?,
            })
        },
        move |person: &Person, out| {
            out.set(&name, person.name.clone())?;
            out.set(&age, person.age)?;
            out.set(&tags, person.tags.clone())
        },
    )
}

/// Generates `count` distinct people.
fn people(count: usize) -> Vec<Person> {
    (0..count)
        .map(|i| Person {
            name: format!("person-{i}"),
            age: i as i32,
            tags: (0..(i % 8) as i32).collect(),
        })
        .collect()
}
