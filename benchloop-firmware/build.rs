//! Build script for benchloop-firmware
//!
//! - Sets up linker search paths and arguments for memory.x
//! - Validates board.toml and turns it into `board_config.rs` constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = load_config();
    validate_config(&config);
    generate_constants(&config);
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
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse board.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml file with the calibration    ║\n\
            ║  and timing constants, next to build.rs.                         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
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

/// Validate sections and value ranges
fn validate_config(config: &toml::Value) {
    let mut errors = Vec::new();

    for section in ["serial", "calibration", "monitor", "pulse"] {
        if config.get(section).and_then(|v| v.as_table()).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
    if !errors.is_empty() {
        report_errors(&errors);
    }

    check_range(config, &mut errors, "serial", "baudrate", 300, 921_600);

    let vref = check_range(config, &mut errors, "calibration", "vref_mv", 1, 5_000);
    let lo = check_range(config, &mut errors, "calibration", "dac_lo_mv", 0, 5_000);
    let hi = check_range(config, &mut errors, "calibration", "dac_hi_mv", 0, 5_000);
    let bits = check_range(config, &mut errors, "calibration", "adc_bits", 1, 12);
    if let (Some(vref), Some(lo), Some(hi)) = (vref, lo, hi) {
        if lo >= hi {
            errors.push(format!(
                "[calibration] dac_lo_mv ({}) must be below dac_hi_mv ({})",
                lo, hi
            ));
        }
        if hi > vref {
            errors.push(format!(
                "[calibration] dac_hi_mv ({}) exceeds vref_mv ({})",
                hi, vref
            ));
        }
        if let Some(bits) = bits {
            let (lo_counts, hi_counts) = window_counts(vref, lo, hi, bits);
            if lo < hi && lo_counts >= hi_counts {
                errors.push(format!(
                    "[calibration] EmptyRange: {} bits gives lo = hi = {} counts",
                    bits, lo_counts
                ));
            }
        }
    }

    check_range(config, &mut errors, "monitor", "threshold_x10", 0, 2_549);
    check_bool(config, &mut errors, "monitor", "active_high");

    check_range(config, &mut errors, "pulse", "period_ms", 1, 3_600_000);
    check_range(config, &mut errors, "pulse", "grain_ms", 0, 60_000);
    check_bool(config, &mut errors, "pulse", "active_high");

    if !errors.is_empty() {
        report_errors(&errors);
    }
}

/// Raw input counts at the DAC window edges, truncated like `Calibration::new`
fn window_counts(vref_mv: i64, lo_mv: i64, hi_mv: i64, bits: i64) -> (i64, i64) {
    let full_scale = (1i64 << bits) - 1;
    (full_scale * lo_mv / vref_mv, full_scale * hi_mv / vref_mv)
}

/// Check an integer key lies in `[min, max]`, returning it when valid
fn check_range(
    config: &toml::Value,
    errors: &mut Vec<String>,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => Some(*value),
        Some(toml::Value::Integer(value)) => {
            errors.push(format!(
                "[{}] {} = {} out of range ({}..={})",
                section, key, value, min, max
            ));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Check a boolean key is present
fn check_bool(config: &toml::Value, errors: &mut Vec<String>, section: &str, key: &str) {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Boolean(_)) => {}
        Some(_) => errors.push(format!("[{}] {} must be true or false", section, key)),
        None => errors.push(format!("[{}] missing '{}'", section, key)),
    }
}

/// Abort the build with all validation errors
fn report_errors(errors: &[String]) -> ! {
    let error_list = errors
        .iter()
        .map(|e| format!("║  • {:<62} ║", e))
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: board.toml validation failed                             ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        error_list
    );
}

/// Write validated values as Rust constants into OUT_DIR/board_config.rs
fn generate_constants(config: &toml::Value) {
    let int = |section: &str, key: &str| -> i64 {
        config
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_integer())
            .unwrap()
    };
    let flag = |section: &str, key: &str| -> bool {
        config
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_bool())
            .unwrap()
    };

    let source = format!(
        "// Generated by build.rs from board.toml. Do not edit.\n\
         pub const SERIAL_BAUDRATE: u32 = {};\n\
         pub const VREF_MV: u16 = {};\n\
         pub const DAC_LO_MV: u16 = {};\n\
         pub const DAC_HI_MV: u16 = {};\n\
         pub const ADC_BITS: u8 = {};\n\
         pub const MONITOR_THRESHOLD_X10: i32 = {};\n\
         pub const MONITOR_ACTIVE_HIGH: bool = {};\n\
         pub const PULSE_PERIOD_MS: u32 = {};\n\
         pub const PULSE_GRAIN_MS: u32 = {};\n\
         pub const PULSE_ACTIVE_HIGH: bool = {};\n",
        int("serial", "baudrate"),
        int("calibration", "vref_mv"),
        int("calibration", "dac_lo_mv"),
        int("calibration", "dac_hi_mv"),
        int("calibration", "adc_bits"),
        int("monitor", "threshold_x10"),
        flag("monitor", "active_high"),
        int("pulse", "period_ms"),
        int("pulse", "grain_ms"),
        flag("pulse", "active_high"),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board_config.rs"), source).unwrap();

    println!("cargo:warning=board.toml validated successfully");
}
