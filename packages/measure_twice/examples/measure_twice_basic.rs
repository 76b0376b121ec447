//! Measures a single block with the default configuration.

use measure_twice::measure_once;

fn main() -> Result<(), measure_twice::Error> {
    let result = measure_once(|| {
        let mut sum = 0_u64;
        for i in 0..100_u64 {
            sum = sum.wrapping_add(i.wrapping_mul(i));
        }
        sum
    })?;

    println!();
    println!("processor time: {:?}", result.processor_time());
    println!("wall time:      {:?}", result.wall_time());

    Ok(())
}
