//! Build script: re-embed the web front end whenever it changes.

fn main() {
    println!("cargo:rerun-if-changed=web");
}
