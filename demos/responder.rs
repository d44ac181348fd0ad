//! Answers CEC frames read from stdin, one wire text per line.
//!
//! `cargo run --example responder -- 2.1.0.0 pi4`
//! then type e.g. `04:83` or `0F:86:21:00`. Set `RUST_LOG=trace` to see every frame.
use cec_follower::*;
use std::io::BufRead;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = CecDeviceConfig {
        physical_address: Some(args.next().unwrap_or_else(|| "1.0.0.0".to_string())),
        osd_name: args.next().unwrap_or_else(|| "cec-follower".to_string()),
        ..Default::default()
    };
    let mut dev = config.build()?;

    // pretend the first candidate was free
    let addr = dev.claim_candidates()[0];
    dev.set_logical_address(addr)?;
    dev.set_power_status(PowerStatus::On);
    println!("{}", dev.report_physical_address());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let msg = match line.parse::<CecMessage>() {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };
        match dev.process(&msg) {
            Ok(Some(reply)) => println!("{reply}"),
            Ok(None) => {}
            Err(CecError::NotSupported(what)) => log::warn!("{}: {what}", msg.describe()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
