//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` locally so the backdrops can be previewed in a browser.

use std::process::{self, Command, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

fn port_from_env() -> u16 {
    match env::var("BACKDROP_PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("BACKDROP_PORT={raw:?} is not a port number, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/). Serving existing static/pkg.");
        }
    }

    let port = port_from_env();
    println!("Serving static/ at http://127.0.0.1:{port}/ (try ?effect=bokeh|twilight|flow|stars|dust)");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn();

    let mut server = match server {
        Ok(child) => child,
        Err(err) => {
            eprintln!("failed to start python3 http.server: {err}");
            process::exit(1);
        }
    };

    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                process::exit(status.code().unwrap_or(1));
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(err) => {
                eprintln!("lost track of http server: {err}");
                process::exit(1);
            }
        }
    }
}
