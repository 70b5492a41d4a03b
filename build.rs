fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Stamp the binary with its build time for `antfarm --version` output
    let build_date = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    println!("cargo:rustc-env=ANTFARM_BUILD_DATE={}", build_date);
}
