//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! with wasm-pack and serves `static/` on a local port.
//!
//! Usage: `cargo run -- [port]` (default 8000).

use std::process::{Command, ExitCode, Stdio};

fn main() -> ExitCode {
    let port = std::env::args().nth(1).unwrap_or_else(|| "8000".to_string());
    if port.parse::<u16>().is_err() {
        eprintln!("invalid port `{port}`");
        return ExitCode::FAILURE;
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/). \
                 Serving whatever is already in static/pkg."
            );
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match server {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(st) => {
            eprintln!("http server exited with {st}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("failed to start http server (python3 required): {err}");
            ExitCode::FAILURE
        }
    }
}
