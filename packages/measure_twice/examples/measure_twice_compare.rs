//! Compares alternative ways of building a string, with diagnostic logging enabled.
//!
//! Run with `RUST_LOG=measure_twice=debug` to see the logged measurement events.

use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

use measure_twice::{Benchmark, Config, ScriptInfo, Templates, register};
use new_zealand::nz;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), measure_twice::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::new()
        .with_default_iterations(nz!(5_000))
        .with_templates(Templates::default().with_label("%s"));

    let mut benchmark = Benchmark::new(config);

    let mut registry: Vec<ScriptInfo> = Vec::new();
    register(&mut registry);

    benchmark.measure().session(|x| {
        x.report().label("format!").run(|| format!("{}:{}", 12, 34))?;

        x.report().label("write!").run(|| {
            let mut s = String::new();
            write!(s, "{}:{}", 12, 34).expect("writing to a String cannot fail");
            s
        })?;

        x.report().label("push_str").run(|| {
            let mut s = 12.to_string();
            s.push(':');
            s.push_str(&34.to_string());
            s
        })?;

        // Sleeping costs wall time but almost no processor time.
        x.report()
            .label("sleep")
            .iterations(3)
            .run(|| thread::sleep(Duration::from_millis(10)))?;

        Ok(())
    })?;

    for script in &registry {
        println!("registered {} {}", script.name(), script.version());
    }

    Ok(())
}
