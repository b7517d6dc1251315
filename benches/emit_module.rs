use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wasm_composer::ops;
use wasm_composer::{
    encode_module, DataMode, DataSegment, ElementInitializer, ElementMode, ElementSegment,
    Function, Global, GlobalType, Import, ImportDescription, Limit, Memory, MemoryType, Module,
    ReferenceType, Table, TableType, ValueType,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("empty", |b| {
        let empty_module = Module::empty();

        b.iter(move || {
            let bytes =
                encode_module(&empty_module).expect("An error occurred emitting the module.");
            black_box(bytes.len())
        })
    });
    c.bench_function("singular", |b| {
        let singular_module = new_singular_module();

        b.iter(move || {
            let bytes =
                encode_module(&singular_module).expect("An error occurred emitting the module.");
            black_box(bytes.len())
        })
    });
}

/// Creates a new module with 1 of each segment.
fn new_singular_module() -> Module {
    let mut builder = Module::builder();

    builder
        .add_function(
            Function::new(
                "accumulate",
                vec![("seed".into(), ValueType::I32)],
                vec![ValueType::I32],
                vec![
                    ops::local::get("seed"),
                    ops::i32::constant(1),
                    ops::i32::add(),
                    ops::local::set("total"),
                    ops::local::get("total"),
                    ops::control::end(),
                ],
            )
            .with_locals(vec![("total".into(), ValueType::I32)])
            .exported(),
        )
        .expect("the module has room for one function");

    builder
        .add_import(Import::new("test", "foobar", ImportDescription::Function(0)))
        .expect("the module has room for one import");

    builder
        .add_table(Table::new(
            "handlers",
            TableType::new(ReferenceType::function(), Limit::unbounded(1)),
        ))
        .expect("the module has room for one table");

    builder
        .add_memory(Memory::new("heap", MemoryType::new(Limit::unbounded(1))))
        .expect("the module has room for one memory");

    builder
        .add_global(Global::new(
            "counter",
            GlobalType::immutable(ValueType::I64),
            vec![ops::i64::constant(0), ops::control::end()],
        ))
        .expect("the module has room for one global");

    builder
        .add_element(ElementSegment::new(
            "startup",
            ReferenceType::function(),
            ElementMode::Passive,
            ElementInitializer::Functions(vec!["accumulate".into()]),
        ))
        .expect("the module has room for one element segment");

    builder
        .add_data(DataSegment::new(
            "greeting",
            DataMode::Passive,
            vec![42],
        ))
        .expect("the module has room for one data segment");

    builder.set_start(Some("accumulate".into()));

    builder.build()
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
