//! atrium seal / open commands

use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use cipher::PayloadCipher;
use shared::AccessConfig;

#[derive(Debug, Args)]
pub struct SealCommand {
    /// Plaintext to seal; read from stdin when omitted
    pub text: Option<String>,

    #[command(flatten)]
    pub key: KeySource,

    /// Wrap the envelope in base64
    #[arg(long)]
    pub base64: bool,
}

#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Envelope to open; read from stdin when omitted
    pub envelope: Option<String>,

    #[command(flatten)]
    pub key: KeySource,

    /// Treat the input as a base64-wrapped envelope
    #[arg(long)]
    pub base64: bool,
}

/// Where the cipher key comes from
#[derive(Debug, Args)]
pub struct KeySource {
    /// Hex-encoded 256-bit key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Configuration file carrying the key (atrium.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl KeySource {
    fn cipher(&self) -> anyhow::Result<PayloadCipher> {
        let key_hex = match (&self.key, &self.config) {
            (Some(key), _) => key.clone(),
            (None, Some(path)) => AccessConfig::from_file(path)?.cipher_key,
            (None, None) => anyhow::bail!("provide a key with --key or --config"),
        };
        PayloadCipher::from_hex_key(&key_hex).context("invalid cipher key")
    }
}

impl SealCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let cipher = self.key.cipher()?;
        let text = read_input(self.text.as_deref())?;

        let envelope = if self.base64 {
            cipher.encrypt_base64(&text)?
        } else {
            cipher.encrypt(&text)?
        };
        println!("{}", envelope);
        Ok(())
    }
}

impl OpenCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let cipher = self.key.cipher()?;
        let envelope = read_input(self.envelope.as_deref())?;

        let plaintext = if self.base64 {
            cipher.decrypt_base64(envelope.trim())?
        } else {
            cipher.decrypt(envelope.trim())?
        };
        println!("{}", plaintext);
        Ok(())
    }
}

fn read_input(arg: Option<&str>) -> anyhow::Result<String> {
    match arg {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
