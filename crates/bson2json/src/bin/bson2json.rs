//! `bson2json` — transcode a BSON document (stdin) to JSON (stdout).
//!
//! Usage:
//!   bson2json [--array] [--stream] [--chunk-size N]

use bson2json::{stream, transcode, TranscodeOptions};
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut is_array = false;
    let mut chunked = false;
    let mut chunk_size = 0usize;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--array" => {
                is_array = true;
            }
            "--stream" => {
                chunked = true;
            }
            "--chunk-size" => {
                i += 1;
                if let Some(n) = args.get(i).and_then(|s| s.parse().ok()) {
                    chunk_size = n;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let mut input = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut input) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let opts = TranscodeOptions {
        is_array,
        chunk_size,
        fixed_buffer: None,
    };

    let mut stdout = io::stdout();
    if chunked {
        for chunk in stream(input, opts) {
            match chunk {
                Ok(bytes) => {
                    stdout.write_all(&bytes).unwrap();
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    } else {
        match transcode(&input, opts) {
            Ok(json) => {
                stdout.write_all(&json).unwrap();
            }
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
