//! Gift command - manage gift payment sessions.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use storagift_core::{Fid, GiftParams, PaymentGateway};

use crate::output::{JsonFormatter, SessionOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the gift command.
#[derive(Args)]
pub struct GiftArgs {
    #[command(subcommand)]
    pub action: GiftAction,
}

/// Gift subcommands.
#[derive(Subcommand)]
pub enum GiftAction {
    /// Open a payment session for a storage gift.
    Create {
        /// Account receiving the storage units.
        #[arg(long)]
        recipient: u64,

        /// Number of storage units to gift.
        #[arg(long, default_value = "1")]
        units: u64,

        /// Wallet address paying for the gift.
        #[arg(long)]
        payer: String,

        /// CAIP-2 chain the payment settles on (e.g. eip155:8453).
        #[arg(long)]
        chain: String,

        /// Restrict payment to a specific currency.
        #[arg(long)]
        currency: Option<String>,
    },

    /// Show the current state of a session.
    Status {
        /// Gateway session identifier.
        session_id: String,
    },

    /// Attach the payer's signed transaction hash to a session.
    Attach {
        /// Gateway session identifier.
        session_id: String,

        /// Transaction hash of the signed payment.
        tx_hash: String,
    },
}

/// Runs the gift command.
pub async fn run(args: &GiftArgs, cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let gateway = super::build_gateway(&config)?;

    let session = match &args.action {
        GiftAction::Create {
            recipient,
            units,
            payer,
            chain,
            currency,
        } => {
            info!(recipient = *recipient, units = *units, "Creating gift session");
            let params = GiftParams {
                payer_address: payer.clone(),
                chain_id: chain.clone(),
                payment_currency: currency.clone(),
                recipient_fid: Fid(*recipient),
                units: *units,
            };
            gateway.create_session(&params).await?
        }
        GiftAction::Status { session_id } => {
            info!(session_id = %session_id, "Fetching gift session");
            gateway.session_by_id(session_id).await?
        }
        GiftAction::Attach {
            session_id,
            tx_hash,
        } => {
            info!(session_id = %session_id, "Attaching payment transaction");
            let accepted = gateway
                .update_payment_transaction(session_id, tx_hash)
                .await?;
            if !accepted {
                anyhow::bail!("Gateway rejected transaction hash for session {session_id}");
            }
            gateway.session_by_id(session_id).await?
        }
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_session(&session));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&SessionOutput::from(&session))?);
        }
    }

    Ok(())
}
