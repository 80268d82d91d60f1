//! peer-id CLI — `peerid` command.
//!
//! Generates peer identities and converts identifiers between their
//! Base58, CIDv1, hex and JSON forms.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use peer_id::{KeyType, PeerId};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// peer-id CLI — generate, inspect and convert libp2p peer identities.
#[derive(Parser, Debug)]
#[command(
    name = "peerid",
    about = "peer-id CLI",
    version,
    long_about = "peerid — peer-id CLI\n\nGenerate libp2p peer identities and convert identifiers\nbetween Base58, CIDv1, hex and JSON."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new identity
    Generate {
        /// Key algorithm
        #[arg(long, value_enum, default_value_t = Algorithm::Ed25519)]
        key_type: Algorithm,

        /// RSA modulus size in bits
        #[arg(long)]
        bits: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Display everything derivable from an identifier
    Inspect {
        /// Base58, CIDv1 or hex identifier
        id: String,
    },

    /// Convert an identifier to another text form
    Convert {
        /// Base58, CIDv1 or hex identifier
        id: String,

        /// Target form
        #[arg(long, value_enum)]
        to: TextForm,
    },

    /// Load an identity from a JSON envelope (use "-" for stdin)
    FromJson {
        /// Path to the JSON file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Ed25519,
    Secp256k1,
    Rsa,
}

impl From<Algorithm> for KeyType {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Ed25519 => KeyType::Ed25519,
            Algorithm::Secp256k1 => KeyType::Secp256k1,
            Algorithm::Rsa => KeyType::Rsa,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// JSON envelope including the private key
    Json,
    B58,
    Cid,
    Hex,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TextForm {
    B58,
    Cid,
    Hex,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Accept Base58, CIDv1 or hex.
fn parse_any(text: &str) -> Result<PeerId> {
    let text = text.trim();
    if let Ok(peer) = PeerId::parse(text) {
        return Ok(peer);
    }
    PeerId::from_hex(text)
        .with_context(|| format!("'{text}' is not a Base58, CIDv1 or hex peer id"))
}

fn render(peer: &PeerId, form: TextForm) -> String {
    match form {
        TextForm::B58 => peer.to_b58_string(),
        TextForm::Cid => peer.to_cid_string(),
        TextForm::Hex => peer.to_hex(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_generate(
    key_type: KeyType,
    bits: Option<usize>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let peer = PeerId::generate_with_bits(key_type, bits)
        .with_context(|| format!("failed to generate {key_type} identity"))?;

    if verbose {
        eprintln!("Generated {key_type} identity {peer}");
    }

    let output = match format {
        OutputFormat::Json => {
            // RSA private keys cannot be exported from an identity.
            let json = if key_type == KeyType::Rsa {
                peer.to_json()?
            } else {
                peer.to_json_with_private_key()?
            };
            serde_json::to_string_pretty(&json).context("failed to serialize identity")?
        }
        OutputFormat::B58 => render(&peer, TextForm::B58),
        OutputFormat::Cid => render(&peer, TextForm::Cid),
        OutputFormat::Hex => render(&peer, TextForm::Hex),
    };
    println!("{output}");
    Ok(())
}

fn cmd_inspect(id: &str, verbose: bool) -> Result<()> {
    let peer = parse_any(id)?;

    println!("Peer: {peer}");
    println!("  CID:       {}", peer.to_cid_string());
    println!("  Hex:       {}", peer.to_hex());
    println!(
        "  Key type:  {}",
        peer.key_type()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown (hashed)".to_string())
    );
    println!(
        "  Strategy:  {}",
        if peer.is_inline() { "inline" } else { "sha2-256" }
    );
    println!("  Valid:     {}", peer.is_valid());
    println!("  Multihash: {}", peer.decode_id()?);

    if verbose {
        if let Ok(public) = peer.marshal_public_key() {
            println!("  Public key envelope: {}", hex::encode(public));
        }
    }
    Ok(())
}

fn cmd_convert(id: &str, to: TextForm) -> Result<()> {
    let peer = parse_any(id)?;
    println!("{}", render(&peer, to));
    Ok(())
}

fn cmd_from_json(path: &Path, verbose: bool) -> Result<()> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let peer = PeerId::from_json_str(&text).context("invalid peer id JSON")?;
    println!("Peer: {peer}");
    println!(
        "  Private key: {}",
        if peer.has_private_key() {
            "present"
        } else {
            "absent"
        }
    );

    if verbose {
        println!("  CID: {}", peer.to_cid_string());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    log::debug!("running {:?}", cli.command);

    let result = match cli.command {
        Commands::Generate {
            key_type,
            bits,
            format,
        } => cmd_generate(key_type.into(), bits, format, verbose),
        Commands::Inspect { id } => cmd_inspect(&id, verbose),
        Commands::Convert { id, to } => cmd_convert(&id, to),
        Commands::FromJson { path } => cmd_from_json(&path, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
