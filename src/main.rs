//! QuickDial CLI Application.
//!
//! This binary is the front end for the quickdial library: it owns the
//! generation session, calls into the core with raw strings and reports
//! notices back to the user.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use quickdial::{
    normalize_phone_input, truncate_name_input, validate_phone_number, ContactName, Delivery,
    GenerationSession, Notice, NoticeLevel, OutboxRelay, QuickDialConfig, QuickDialError,
    QuickDialService, SpoolShare, UnsupportedShare,
};

/// Printable call-me QR codes
///
/// Generates a tel: QR code for a phone number and saves a one-page PDF
/// with cut-out instructions for your windshield.
#[derive(Parser)]
#[command(name = "quickdial")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Phone number to encode
    #[arg(short, long, value_name = "NUMBER")]
    phone: Option<String>,

    /// Contact name printed above the number (max 30 characters)
    #[arg(short, long, value_name = "NAME", default_value = "")]
    name: String,

    /// Directory the PDF is saved into
    #[arg(short, long, value_name = "DIR", env = "QUICKDIAL_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Also save the QR code as PNG next to the PDF
    #[arg(long)]
    png: bool,

    /// Share through a spool directory instead of saving directly
    #[arg(long, value_name = "DIR", env = "QUICKDIAL_SHARE_DIR")]
    share_dir: Option<PathBuf>,

    /// Share through the platform facility (falls back to saving)
    #[arg(long, conflicts_with = "share_dir")]
    share: bool,

    /// Email the PDF to this address
    #[arg(long, value_name = "ADDRESS", requires = "email_outbox")]
    email_to: Option<String>,

    /// Outbox directory emails are written into
    #[arg(long, value_name = "DIR", env = "QUICKDIAL_EMAIL_OUTBOX")]
    email_outbox: Option<PathBuf>,

    /// Custom email message
    #[arg(long, value_name = "TEXT")]
    email_message: Option<String>,

    /// Site printed on the sheet
    #[arg(long, value_name = "HOST", env = "QUICKDIAL_SITE", default_value = quickdial::compose::DEFAULT_SITE)]
    site: String,

    /// QR bitmap size in pixels
    #[arg(long, value_name = "PX", default_value_t = quickdial::config::DEFAULT_QR_SIZE_PX)]
    qr_size: u32,

    /// Show a "generating" indicator for this long before rendering
    #[arg(long, value_name = "MS", default_value_t = 0)]
    delay_ms: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how typed input is normalised while editing
    Normalize {
        /// Raw phone input
        raw: String,

        /// Raw name input (truncated to 30 characters)
        #[arg(long)]
        name: Option<String>,
    },

    /// Validate a phone number and print its canonical form
    Validate {
        /// Phone number to check
        raw: String,
    },

    /// Print the page plan as JSON without rendering a PDF
    Plan {
        #[arg(short, long, value_name = "NUMBER")]
        phone: String,

        #[arg(short, long, value_name = "NAME", default_value = "")]
        name: String,
    },
}

/// Generation command handler owning the session.
struct QuickDialHandler {
    service: QuickDialService,
    session: GenerationSession,
    verbose: bool,
}

impl QuickDialHandler {
    fn new(config: QuickDialConfig, verbose: bool) -> Self {
        Self {
            service: QuickDialService::with_default_renderers(config),
            session: GenerationSession::new(),
            verbose,
        }
    }

    /// Generates the QR code.
    ///
    /// Input is validated before the indicator delay, so rejected input
    /// fails immediately and only accepted input waits.
    fn generate(&mut self, phone: &str, name: &str) -> Result<()> {
        validate_phone_number(phone).map_err(surface)?;
        ContactName::parse(name).map_err(surface)?;

        let delay = self.service.config().indicator_delay;
        if !delay.is_zero() {
            eprintln!("Generating...");
            std::thread::sleep(delay);
        }

        let artifact = self
            .service
            .generate(&mut self.session, phone, name)
            .map_err(surface)?;

        println!("Ready to Use!");
        if let Some(name) = artifact.name.get() {
            println!("  Name:  {}", name);
        }
        println!("  Phone: {}", artifact.phone);
        if self.verbose {
            println!("  Payload: {}", artifact.payload);
        }
        println!("  Scan with any smartphone camera to call directly");
        Ok(())
    }

    fn save_png(&self, dir: &Path) -> Result<()> {
        let artifact = self.session.current().map_err(surface)?;
        let png = artifact.qr.to_png().map_err(surface)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("QuickDial-{}.png", artifact.phone.digits()));
        std::fs::write(&path, png)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        print_notice(&Notice::success(format!("QR image saved → {}", path.display())));
        Ok(())
    }

    fn deliver(&self, share_dir: Option<&Path>, share: bool, dir: &Path) -> Result<()> {
        let delivery = match share_dir {
            Some(spool) => self.service.share(&self.session, &SpoolShare::new(spool)),
            None if share => self.service.share(&self.session, &UnsupportedShare),
            None => self.service.download(&self.session, Some(dir)),
        }
        .map_err(surface)?;

        print_notice(&delivery.notice());
        match delivery {
            Delivery::Saved { path, .. } => println!("  → {}", path.display()),
            Delivery::Shared { filename } => println!("  → {}", filename),
        }
        Ok(())
    }

    fn email(&self, to: &str, outbox: &Path, message: Option<&str>) -> Result<()> {
        let email = self
            .service
            .email(&self.session, &OutboxRelay::new(outbox), to, message)
            .map_err(surface)?;
        print_notice(&Notice::success(format!(
            "Email to {} queued in {}",
            email.to,
            outbox.display()
        )));
        Ok(())
    }
}

/// Attaches the user-facing notice to a library error.
fn surface(err: QuickDialError) -> anyhow::Error {
    let notice = err.notice();
    anyhow::Error::new(err).context(notice.message)
}

fn print_notice(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Success => "✓",
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Danger => "✗",
    };
    println!("{} {}", marker, notice);
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Normalize { raw, name }) => {
            println!("{}", normalize_phone_input(raw));
            if let Some(name) = name {
                println!("{}", truncate_name_input(name));
            }
        }
        Some(Commands::Validate { raw }) => {
            let phone = validate_phone_number(raw).map_err(surface)?;
            println!("{}", phone);
        }
        Some(Commands::Plan { phone, name }) => {
            let config = QuickDialConfig::builder()
                .site(cli.site.as_str())
                .qr_size_px(cli.qr_size)
                .build()
                .map_err(surface)?;
            let mut handler = QuickDialHandler::new(config, false);
            handler
                .service
                .generate(&mut handler.session, phone, name)
                .map_err(surface)?;
            let plan = handler.service.plan(&handler.session).map_err(surface)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&plan).context("Failed to serialise plan")?
            );
        }
        None => {
            let phone = cli
                .phone
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--phone is required"))?;

            let config = QuickDialConfig::builder()
                .site(cli.site.as_str())
                .qr_size_px(cli.qr_size)
                .output_dir(cli.output_dir.clone())
                .indicator_delay(Duration::from_millis(cli.delay_ms))
                .build()
                .map_err(surface)?;

            let mut handler = QuickDialHandler::new(config, cli.verbose);
            handler.generate(phone, &cli.name)?;

            if cli.png {
                handler.save_png(&cli.output_dir)?;
            }
            handler.deliver(cli.share_dir.as_deref(), cli.share, &cli.output_dir)?;

            if let (Some(to), Some(outbox)) = (&cli.email_to, &cli.email_outbox) {
                handler.email(to, outbox, cli.email_message.as_deref())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_keeps_notice() {
        let err = surface(QuickDialError::EmptyInput);
        assert_eq!(err.to_string(), "Please enter a phone number");
        assert!(err.root_cause().to_string().contains("empty"));
    }

    #[test]
    fn test_cli_parses_subcommand() {
        let cli = Cli::try_parse_from(["quickdial", "normalize", "01712345678"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Normalize { .. })));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["quickdial", "--phone", "01712345678"]).unwrap();
        assert_eq!(cli.name, "");
        assert_eq!(cli.qr_size, 280);
        assert_eq!(cli.delay_ms, 0);
        assert!(cli.command.is_none());
    }
}
