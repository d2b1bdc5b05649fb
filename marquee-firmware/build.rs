//! Build script for marquee-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time
//! - Generates the `DEVICE_CONFIG` constant from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest timeout the RP2040 watchdog counter can hold
const MAX_WATCHDOG_MS: i64 = 8388;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt, RP2040 boot2 and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values read from device.toml
struct Settings {
    clock_hz: i64,
    scroll_tick_ms: i64,
    watchdog_timeout_ms: i64,
    calibrate_oscillator: bool,
    decode_mode: i64,
    intensity: i64,
    scan_limit: i64,
}

/// Validate device.toml configuration at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the marquee-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let device = section(&config, "device", &mut errors);
    let driver = section(&config, "driver", &mut errors);

    let settings = Settings {
        clock_hz: integer(device, "device", "clock_hz", 1_000_000..=200_000_000, &mut errors),
        scroll_tick_ms: integer(device, "device", "scroll_tick_ms", 1..=MAX_WATCHDOG_MS, &mut errors),
        watchdog_timeout_ms: integer(
            device,
            "device",
            "watchdog_timeout_ms",
            1..=MAX_WATCHDOG_MS,
            &mut errors,
        ),
        calibrate_oscillator: boolean(device, "device", "calibrate_oscillator", &mut errors),
        decode_mode: integer(driver, "driver", "decode_mode", 0..=0xFF, &mut errors),
        intensity: integer(driver, "driver", "intensity", 0..=0x0F, &mut errors),
        scan_limit: integer(driver, "driver", "scan_limit", 0..=0x07, &mut errors),
    };

    // The watchdog is only fed between scroll frames
    if settings.scroll_tick_ms >= settings.watchdog_timeout_ms {
        errors.push(format!(
            "[device] scroll_tick_ms ({}) must be below watchdog_timeout_ms ({})",
            settings.scroll_tick_ms, settings.watchdog_timeout_ms
        ));
    }

    if settings.calibrate_oscillator {
        errors.push(
            "[device] calibrate_oscillator is not supported on crystal-clocked RP2040 boards"
                .to_string(),
        );
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
    settings
}

/// Write `$OUT_DIR/device_config.rs`
fn generate_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let source = format!(
        "/// Configuration generated from device.toml\n\
         pub const DEVICE_CONFIG: DeviceConfig = DeviceConfig {{\n    \
             clock_hz: {},\n    \
             scroll_tick_ms: {},\n    \
             watchdog_timeout_ms: {},\n    \
             calibrate_oscillator: {},\n    \
             driver: DriverConfig {{\n        \
                 decode_mode: {},\n        \
                 intensity: {},\n        \
                 scan_limit: {},\n    \
             }},\n\
         }};\n",
        settings.clock_hz,
        settings.scroll_tick_ms,
        settings.watchdog_timeout_ms,
        settings.calibrate_oscillator,
        settings.decode_mode,
        settings.intensity,
        settings.scan_limit,
    );

    fs::write(out_dir.join("device_config.rs"), source).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

fn integer(
    table: Option<&toml::value::Table>,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    let Some(table) = table else {
        return *range.start();
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) if range.contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            *range.start()
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            *range.start()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            *range.start()
        }
    }
}

fn boolean(
    table: Option<&toml::value::Table>,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> bool {
    match table.map(|t| t.get(key)) {
        Some(Some(toml::Value::Boolean(value))) => *value,
        Some(Some(_)) => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            false
        }
        Some(None) => {
            errors.push(format!("[{}] missing '{}'", section, key));
            false
        }
        None => false,
    }
}
