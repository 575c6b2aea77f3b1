// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use localcert::{fs, x509, Cert, CertificateRequest, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "localcert")]
#[command(about = "Generate self-signed TLS certificates for local development")]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
    localcert                                  # localhost cert with defaults
    localcert -H myserver.local --san '*.myserver.local' --san 192.168.1.100
    localcert -k server.key -c server.crt -d 730

The certificate is self-signed; browsers will warn unless it is trusted
explicitly.")]
struct Cli {
    /// Hostname for the certificate
    #[arg(short = 'H', long, default_value = "localhost")]
    hostname: String,

    /// Days until expiration
    #[arg(short, long, default_value = "365", allow_negative_numbers = true)]
    days: i64,

    /// Private key output file
    #[arg(short, long, value_name = "FILE", default_value = "cert.key")]
    key: PathBuf,

    /// Certificate output file
    #[arg(short, long, value_name = "FILE", default_value = "cert.crt")]
    cert: PathBuf,

    /// RSA key size in bits (2048, 3072 or 4096; larger is slower)
    #[arg(short, long, value_name = "BITS", default_value = "2048")]
    size: u32,

    /// Certificate subject country code
    #[arg(long, default_value = "US")]
    country: String,

    /// Certificate subject state or province
    #[arg(long, default_value = "State")]
    state: String,

    /// Certificate subject city or locality
    #[arg(long, default_value = "City")]
    city: String,

    /// Certificate subject organization
    #[arg(long, default_value = "Local")]
    org: String,

    /// Additional Subject Alternative Name, DNS name or IP (repeatable)
    #[arg(long = "san", value_name = "SAN")]
    sans: Vec<String>,

    /// Overwrite existing files without asking
    #[arg(long)]
    overwrite: bool,

    /// Show certificate details after generation
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_request(self) -> CertificateRequest {
        CertificateRequest {
            hostname: self.hostname,
            days: self.days,
            key_bits: self.size,
            country: self.country,
            state: self.state,
            city: self.city,
            organization: self.org,
            sans: self.sans,
            key_path: self.key,
            cert_path: self.cert,
        }
    }
}

/// Display a confirmation prompt and return true if user confirms with 'y' or 'yes'
fn confirm_prompt(message: &str) -> bool {
    print!("{} [y/N] ", message);
    io::stdout().flush().ok();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

/// Check which output files already exist and ask before replacing them.
/// Returns false if the user declined.
fn confirm_overwrite(request: &CertificateRequest, overwrite: bool) -> bool {
    let existing: Vec<String> = [&request.key_path, &request.cert_path]
        .into_iter()
        .filter(|path| path.exists())
        .map(|path| path.display().to_string())
        .collect();

    if existing.is_empty() || overwrite {
        return true;
    }

    println!(
        "Warning: The following files already exist: {}",
        existing.join(", ")
    );
    confirm_prompt("Overwrite?")
}

fn print_details(cert_path: &Path) -> Result<()> {
    let info = x509::parse_cert_file(cert_path)?;

    println!();
    println!("Certificate details:");
    println!("  Serial: {}", info.serial);
    println!("  Not Before: {}", info.not_before_string());
    println!("  Not After: {}", info.not_after_string());
    println!("  Subject: {}", info.subject);
    println!("  Issuer: {}", info.issuer);
    Ok(())
}

fn main() {
    // Reset SIGPIPE to default behavior (exit) instead of panic
    // This prevents "broken pipe" panics when output is piped to tools like grep/head
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let overwrite = cli.overwrite;
    let verbose = cli.verbose;
    let request = cli.into_request();

    if !confirm_overwrite(&request, overwrite) {
        println!("Aborted.");
        return Ok(());
    }

    println!("Generating certificate...");
    println!("  Hostname: {}", request.hostname);
    println!("  Validity: {} days", request.days);
    println!("  Key size: {} bits", request.key_bits);

    let cert = Cert::generate(&request)?;

    let san_display: Vec<String> = cert.sans.iter().map(|san| san.to_string()).collect();
    println!("  SANs: {}", san_display.join(", "));

    // Key first; a certificate without its key is useless
    fs::atomic_write_secret(&request.key_path, &cert.key_pem)?;
    fs::atomic_write(&request.cert_path, &cert.pem)?;

    println!();
    println!("Certificate generated successfully!");
    println!("  Private key: {}", request.key_path.display());
    println!("  Certificate: {}", request.cert_path.display());

    if verbose {
        print_details(&request.cert_path)?;
    }

    Ok(())
}
