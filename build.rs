use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Nominal HSE crystal frequency used when none is given at build time
const DEFAULT_HSE_HZ: u32 = 8_000_000;
/// SYSCLK ceiling, mirrors `rcc::MAX_SYSCLK_FREQ_HZ`
const MAX_SYSCLK_HZ: u32 = 72_000_000;
/// PLL multiplication range, mirrors `rcc::PLL_MUL_MIN..=PLL_MUL_MAX`
const PLL_MULS: core::ops::RangeInclusive<u32> = 2..=16;

/// `presets!` entries reachable from a PLL input of `input` Hz. Only whole
/// MHz results get a name.
fn preset_entries(input: u32) -> String {
    PLL_MULS
        .map(|mul| (mul, input * mul))
        .filter(|&(_, freq)| freq <= MAX_SYSCLK_HZ && freq % 1_000_000 == 0)
        .map(|(mul, freq)| format!("{mul} => {}", freq / 1_000_000))
        .collect::<Vec<_>>()
        .join(", ")
}

fn crystal_label(hse: u32) -> String {
    if hse % 1_000_000 == 0 {
        format!("{} MHz HSE", hse / 1_000_000)
    } else {
        format!("{hse} Hz HSE")
    }
}

/// Named requests for the crystal fitted to the board
fn hse_presets(hse: u32) -> String {
    let label = crystal_label(hse);
    let fastest = (MAX_SYSCLK_HZ / hse).min(*PLL_MULS.end());

    let mut out = String::new();
    writeln!(out, "presets! {{").unwrap();
    writeln!(
        out,
        "    Hse as HSE (\"{label}\"): [{}],",
        preset_entries(hse)
    )
    .unwrap();
    writeln!(
        out,
        "    HseDiv2 as HSE_DIV2 (\"{label}/2\"): [{}],",
        preset_entries(hse / 2)
    )
    .unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "impl ClockRequest {{").unwrap();
    writeln!(
        out,
        "    /// Fastest SYSCLK reachable from the {label}: \
         x {fastest} = {} Hz",
        hse * fastest
    )
    .unwrap();
    writeln!(
        out,
        "    pub const HSE_FASTEST: ClockRequest = \
         ClockRequest::pll(ClockSource::Hse, {fastest});"
    )
    .unwrap();
    writeln!(out, "}}").unwrap();
    out
}

fn main() {
    // The HSE crystal frequency is a property of the board, not the chip
    println!("cargo:rerun-if-env-changed=STM32F1XX_RCC_HSE_HZ");
    let hse = match env::var("STM32F1XX_RCC_HSE_HZ") {
        Ok(value) => value
            .trim()
            .replace('_', "")
            .parse::<u32>()
            .expect("STM32F1XX_RCC_HSE_HZ must be an integer frequency in Hz"),
        Err(_) => DEFAULT_HSE_HZ,
    };
    assert!(
        (4_000_000..=16_000_000).contains(&hse),
        "STM32F1XX_RCC_HSE_HZ must be between 4 MHz and 16 MHz, got {hse}"
    );

    let out = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(
        out.join("hse.rs"),
        format!(
            "/// Nominal HSE frequency, fixed at build time\n\
             pub const HSE: u32 = {hse}; // Hz\n"
        ),
    )
    .unwrap();
    fs::write(out.join("hse_presets.rs"), hse_presets(hse)).unwrap();

    if env::var("TARGET").unwrap() != "thumbv7m-none-eabi" {
        return;
    }

    // stm32 specific
    fs::copy("memory.x", out.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rustc-link-arg-examples=-Tlink.x");

    // Check if the `defmt` feature is enabled, and if so link its linker script
    if env::var("CARGO_FEATURE_DEFMT").is_ok() {
        println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
    }
}
