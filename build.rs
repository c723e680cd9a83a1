//! Build script for detecting the X11 input stack and providing installation guidance.
//!
//! The library itself is pure Rust; X11 with the XTEST extension is only needed
//! at runtime for the `x11` input backend.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    // Only Linux/BSD desktops run an X server we can drive
    let target = env::var("TARGET").unwrap_or_default();
    if (target.contains("linux") || target.contains("bsd")) && pkg_config_available() {
        check_library("x11", "libx11-dev");
        check_library("xtst", "libxtst-dev");
    }
}

fn pkg_config_available() -> bool {
    match Command::new("pkg-config").arg("--version").output() {
        Ok(output) if output.status.success() => true,
        _ => {
            println!("cargo:warning=pkg-config not found; skipping X11 checks.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
            false
        }
    }
}

fn check_library(name: &str, ubuntu_package: &str) {
    let output = Command::new("pkg-config").args(["--exists", name]).output();

    match output {
        Ok(output) if output.status.success() => {}
        _ => {
            println!("cargo:warning={name} not found. The x11 input backend will not work at runtime.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install {ubuntu_package}");
        }
    }
}
