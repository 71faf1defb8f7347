fn main() {
    // Scenario fixtures are picked up by #[files] at compile time
    println!("cargo:rerun-if-changed=tests/matrix");

    let matrix_dir = std::path::Path::new("tests/matrix");
    if let Ok(entries) = std::fs::read_dir(matrix_dir) {
        for path in entries.filter_map(|e| e.ok()).map(|e| e.path()) {
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}
