// build.rs — Expose the compile-time target triple as a rustc env var.
//
// The probe report opens with a header naming the host platform it ran on,
// so that a pasted report is self-describing. Cargo provides the canonical
// target triple to build scripts via `TARGET`; re-export it as
// `cargo:rustc-env=TARGET=...` so runtime code can read it with
// `env!("TARGET")`.

fn main() {
    // Cargo always sets `TARGET` for build scripts.
    let target = std::env::var("TARGET")
        .expect("TARGET env var not set by Cargo. This should never happen in a normal build.");

    println!("cargo:rustc-env=TARGET={target}");
}
