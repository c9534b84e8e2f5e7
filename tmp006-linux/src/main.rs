use clap::Parser;
use linux_embedded_hal::I2cdev;
use std::{io, sync::mpsc, thread, time::Duration};
use tmp006::{SampleAverage, Tmp006};

mod poll;

/// Poll a TMP006 infrared thermometer and print the object temperature
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to I2C bus (e.g., /dev/i2c-1)
    #[arg(short, long, default_value = "/dev/i2c-1")]
    path: String,
    /// 7-bit I2C address of the sensor (e.g., 0x40)
    #[arg(short, long, default_value = "0x40", value_parser = parse_address)]
    address: u8,
    /// Time between readings, in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    interval: u64,
    /// Stop after this many seconds; runs until killed if omitted
    #[arg(short, long)]
    duration: Option<u64>,
    /// Samples averaged per conversion (1, 2, 4, 8 or 16)
    #[arg(short, long, default_value = "4", value_parser = parse_samples)]
    samples: SampleAverage,
    /// Thermopile sensitivity calibration factor (S0)
    #[arg(long, default_value_t = tmp006::DEFAULT_SENSITIVITY)]
    s0: f64,
    /// Number of decimal places printed
    #[arg(long, default_value_t = 2)]
    precision: usize,
}

fn parse_address(s: &str) -> Result<u8, String> {
    let addr = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| format!("{s}: {e}"))?;
    if addr > 0x7f {
        return Err(format!("{s} is not a 7-bit address"));
    }
    Ok(addr)
}

fn parse_samples(s: &str) -> Result<SampleAverage, String> {
    let count: u8 = s.parse().map_err(|e| format!("{s}: {e}"))?;
    SampleAverage::try_from(count).map_err(String::from)
}

/// Open the bus and bring the sensor into continuous conversion mode.
fn open_sensor(args: &Args) -> Option<Tmp006<I2cdev>> {
    let i2c = match I2cdev::new(&args.path) {
        Ok(i2c) => i2c,
        Err(e) => {
            log::error!("Failed to open I2C bus {}: {:?}", args.path, e);
            return None;
        }
    };
    log::info!("Connected to the I2C bus {}", args.path);
    let mut sensor = Tmp006::new(i2c)
        .with_address(args.address)
        .with_averaging(args.samples)
        .with_sensitivity(args.s0);
    match sensor.init() {
        Ok(ids) => {
            log::info!(
                "Manufacturer = {:04X}, Device = {:04X}",
                ids.manufacturer,
                ids.device
            );
            if !ids.is_tmp006() {
                log::warn!("Device at {:#04x} does not identify as a TMP006", args.address);
            }
            log::info!(
                "Entered continuous conversion mode ({} samples)",
                args.samples.samples()
            );
            Some(sensor)
        }
        Err(e) => {
            log::error!("Failed to initialize TMP006 at {:#04x}: {:?}", args.address, e);
            None
        }
    }
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    let Some(mut sensor) = open_sensor(&args) else {
        std::process::exit(1);
    };
    let interval = Duration::from_millis(args.interval);
    let precision = args.precision;
    let (stop, stopped) = mpsc::channel();
    let poller = thread::spawn(move || {
        let mut out = io::stdout().lock();
        poll::run(
            || sensor.read_temperature(),
            &mut out,
            interval,
            precision,
            &stopped,
        )
    });
    if let Some(secs) = args.duration {
        if poll::stop_after(&poller, Duration::from_secs(secs), &stop) {
            log::info!("Stopping after {} seconds", secs);
        }
    }
    match poller.join() {
        Ok(readings) => log::info!("Took {} readings", readings),
        Err(_) => {
            log::error!("Poll thread panicked");
            std::process::exit(1);
        }
    }
}
