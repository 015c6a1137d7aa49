use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;
use url::Url;

use sauna_reservation::config::log_directive;
use sauna_reservation::form::{
    BookingForm, FormMessage, FormPhase, FormTiming, FormVariant, HttpReservationApi,
    SubmitOutcome,
};

/// Books a sauna slot from the terminal, going through the same form logic
/// as the web page.
#[derive(Parser, Debug)]
#[command(name = "sauna-book", version)]
struct Args {
    /// Reservation service base URL
    #[arg(long, env = "SAUNA_BASE_URL", default_value = "http://127.0.0.1:8080/")]
    base_url: Url,

    /// Date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Opening slot, e.g. 13:00
    #[arg(long)]
    time: String,

    /// Contact address for the booking
    #[arg(long)]
    email: String,

    /// Free-text request (party size, wishes, ...)
    #[arg(long)]
    details: String,

    /// Require this sauna to be open and book it
    #[arg(long)]
    sauna: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directive(|k| std::env::var(k).ok(), "warn")))
        .init();

    let args = Args::parse();
    let api = HttpReservationApi::new(args.base_url.clone())?;
    let variant = match args.sauna {
        Some(_) => FormVariant::SlotPicker,
        None => FormVariant::Simple,
    };
    let mut form = BookingForm::new(Arc::new(api), variant, FormTiming::default());

    form.set_date(args.date);
    form.set_time(args.time);

    let mut updates = form.availability_updates();
    if form.phase() == FormPhase::Polling {
        let loaded = timeout(
            Duration::from_secs(10),
            updates.wait_for(|entries| !entries.is_empty()),
        )
        .await
        .map(|first| first.is_ok())
        .unwrap_or(false);
        if !loaded {
            tracing::warn!("availability did not arrive within 10s");
        }
    }

    println!("リアルタイム空き状況");
    let availability = form.availability();
    if availability.is_empty() {
        println!("  空き状況を取得できませんでした");
    }
    for entry in &availability {
        let status = if entry.available { "空きあり" } else { "満室" };
        println!("  サウナ {}: {}", entry.id, status);
    }

    if let Some(id) = args.sauna {
        form.select_sauna(id)?;
    }
    form.set_email(args.email);
    form.set_details(args.details);

    let mut view = form.subscribe();
    let progress = tokio::spawn(async move {
        while view.changed().await.is_ok() {
            if view.borrow_and_update().phase == FormPhase::Submitting {
                println!("予約処理中...");
            }
        }
    });

    let outcome = form.submit().await;
    let message = form.message();
    drop(form);
    progress.abort();

    match message {
        Some(FormMessage::Success(text)) | Some(FormMessage::Error(text)) => println!("{}", text),
        None => {}
    }

    match outcome {
        SubmitOutcome::Accepted => Ok(()),
        SubmitOutcome::Invalid(e) => bail!("入力内容を確認してください: {}", e),
        SubmitOutcome::Rejected(reason) => bail!("server rejected the reservation: {}", reason),
        SubmitOutcome::TransportFailed => bail!("could not reach {}", args.base_url),
    }
}
