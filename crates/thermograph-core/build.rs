// File: crates/thermograph-core/build.rs
// Summary: Build script to link the Windows system libraries Skia needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, pulled in by Skia's font manager.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
