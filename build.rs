use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Host builds only produce the vector-map dump; nothing to link.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::copy("samg55g19.ld", out.join("samg55g19.ld")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rustc-link-arg=-Tsamg55g19.ld");
    println!("cargo:rerun-if-changed=samg55g19.ld");
}
