//! Subcommand execution on top of the console pages.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;

use gatepass_client::{ApiClient, Download, GatePassApi, PrintScope, ScanImage, ScanKind};
use gatepass_console::admin::ADMIN_STATUS_FILTERS;
use gatepass_console::{
    AdminPage, ConfirmAction, ConsoleConfig, CountUp, Dashboard, FlashSlot, PageError, PhotoPreview,
    PreviewState, Role, TempDirStore,
};
use gatepass_core::{GatePass, GatePassCreate, GatePassStatus, PassNumber, PhotoId};

use crate::cli::{ActionArgs, Cli, Command, ScanArgs};
use crate::prompt;
use crate::render::Painter;

const ANIMATION_FRAMES: u32 = 16;

pub async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(cli.client_config()?).context("invalid API configuration")?;
    let config = cli.console_config();
    let painter = Painter::new(io::stdout().is_terminal());
    tracing::debug!(base_url = %client.base_url(), actor = %config.actor, "client ready");

    match cli.command {
        Command::Pending => pending(&client, &painter).await,
        Command::List { status, number, limit } => list(client, config, &painter, status, number, limit).await,
        Command::Show { number } => {
            let mut page = AdminPage::new(client, config);
            let pass = page.fetch_by_number(&number).await.map_err(page_error)?;
            print!("{}", painter.detail(&pass));
            Ok(())
        }
        Command::History { number } => {
            let mut page = AdminPage::new(client, config);
            let pass = page.fetch_by_number(&number).await.map_err(page_error)?;
            println!("Status history of {}", pass.number);
            print!("{}", painter.history(&pass.status_history));
            Ok(())
        }
        Command::Approve(args) => act(client, config, &painter, ConfirmAction::Approve, args).await,
        Command::Reject(args) => act(client, config, &painter, ConfirmAction::Reject, args).await,
        Command::Delete(args) => act(client, config, &painter, ConfirmAction::Delete, args).await,
        Command::Create {
            person,
            description,
            returnable,
        } => {
            let mut dash = Dashboard::new(client, config);
            let pass = dash
                .create(&GatePassCreate::new(person, description, returnable))
                .await
                .map_err(page_error)?;
            report(&painter, dash.flash());
            print!("{}", painter.detail(&pass));
            Ok(())
        }
        Command::Print { number, out, hr } => print(client, config, &painter, &number, out, hr).await,
        Command::Photo { id, out } => photo(&client, &id, out).await,
        Command::ScanExit(args) => scan(client, config, &painter, ScanKind::Exit, args).await,
        Command::ScanReturn(args) => scan(client, config, &painter, ScanKind::Return, args).await,
        Command::Dashboard { role, status, animate } => {
            dashboard(client, config, &painter, role, status.0, animate).await
        }
    }
}

fn page_error(err: PageError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

fn report(painter: &Painter, flash: &FlashSlot) {
    if let Some(flash) = flash.last() {
        eprintln!("{}", painter.flash(flash));
    }
}

async fn pending(client: &ApiClient, painter: &Painter) -> Result<()> {
    let passes = client.pending().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let rows: Vec<&GatePass> = passes.iter().collect();
    print!("{}", painter.table(&rows));
    eprintln!("{} pending gatepass(es)", passes.len());
    Ok(())
}

async fn list(
    client: ApiClient,
    config: ConsoleConfig,
    painter: &Painter,
    status: Option<GatePassStatus>,
    number: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    if let Some(status) = status.filter(|s| !ADMIN_STATUS_FILTERS.contains(s)) {
        bail!("'{status}' is not an admin status filter; use the dashboard command instead");
    }

    let mut page = AdminPage::new(client, config);
    page.set_status_filter(status);
    page.set_number_filter(number.unwrap_or_default());
    page.apply_filters().await.map_err(page_error)?;
    report(painter, page.flash());

    let passes = page.passes().loaded().map(Vec::as_slice).unwrap_or_default();
    let shown: Vec<&GatePass> = passes.iter().take(limit.unwrap_or(usize::MAX)).collect();
    print!("{}", painter.table(&shown));
    if shown.len() < passes.len() {
        eprintln!("Showing {} of {}", shown.len(), passes.len());
    }
    Ok(())
}

async fn act(
    client: ApiClient,
    config: ConsoleConfig,
    painter: &Painter,
    action: ConfirmAction,
    args: ActionArgs,
) -> Result<()> {
    let mut page = AdminPage::new(client, config);
    let pass = page.fetch_by_number(&args.number).await.map_err(page_error)?;
    let prompt_text = page.request(action, &pass.number).map_err(page_error)?;

    if !args.yes {
        eprintln!("{}", action.title());
        let confirmed = prompt::confirm(&prompt_text, io::stdin().lock(), io::stderr())
            .context("failed to read confirmation")?;
        if !confirmed {
            page.cancel();
            eprintln!("Cancelled");
            return Ok(());
        }
    }

    let outcome = page.confirm().await.map_err(page_error)?;
    report(painter, page.flash());
    if let Some(err) = &outcome.reload_error {
        eprintln!("warning: could not refresh gatepass: {}", err.user_message());
    }
    print!("{}", painter.detail(&outcome.pass));
    Ok(())
}

async fn print(
    client: ApiClient,
    config: ConsoleConfig,
    painter: &Painter,
    number: &str,
    out: Option<PathBuf>,
    hr: bool,
) -> Result<()> {
    let download = if hr {
        let number = PassNumber::parse(number)?;
        client
            .print(&number, PrintScope::Hr)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?
    } else {
        let number = PassNumber::parse(number)?;
        let mut page = AdminPage::new(client, config);
        let download = page.print(&number).await.map_err(page_error)?;
        report(painter, page.flash());
        download
    };

    let path = out.unwrap_or_else(|| PathBuf::from(&download.file_name));
    save(&download, &path)
}

async fn photo(client: &ApiClient, id: &str, out: Option<PathBuf>) -> Result<()> {
    let photo = PhotoId::parse(id)?;

    if let Some(path) = out {
        let download = client
            .photo(&photo)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        return save(&download, &path);
    }

    let store = TempDirStore::new().context("failed to create preview directory")?;
    let mut preview = PhotoPreview::new(store);
    let href = match preview.show(client, photo).await {
        PreviewState::Ready(_, url) => url.to_string(),
        PreviewState::Unavailable(photo) => bail!("Image not available: {photo}"),
        PreviewState::Closed | PreviewState::Loading(_) => bail!("Image not available"),
    };

    println!("{href}");
    prompt::wait_for_enter("Press Enter to close the preview...", io::stdin().lock(), io::stderr())?;
    preview.close();
    Ok(())
}

async fn scan(client: ApiClient, config: ConsoleConfig, painter: &Painter, kind: ScanKind, args: ScanArgs) -> Result<()> {
    let number = PassNumber::parse(&args.number)?;
    let image = ScanImage::from_path(&args.image)
        .with_context(|| format!("failed to read image {}", args.image.display()))?;

    let mut dash = Dashboard::new(client, config);
    let pass = dash.scan(kind, &number, image).await.map_err(page_error)?;
    report(painter, dash.flash());
    print!("{}", painter.detail(&pass));
    Ok(())
}

async fn dashboard(
    client: ApiClient,
    config: ConsoleConfig,
    painter: &Painter,
    role: Role,
    status: Option<GatePassStatus>,
    animate: bool,
) -> Result<()> {
    let count_up = config.count_up;
    let mut dash = Dashboard::new(client, config);
    dash.select(role, status).await.map_err(page_error)?;

    let stats = dash.stats();
    let cards = stats.kpi_cards();
    let finals: Vec<u64> = cards.iter().map(|c| c.value as u64).collect();

    println!("Dashboard ({role})");
    if animate && io::stdout().is_terminal() {
        animate_kpis(painter, &cards, &finals, count_up).await?;
    } else {
        print!("{}", painter.kpis(&cards, &finals));
    }

    println!("\nStatus distribution");
    print!("{}", painter.distribution(&dash.distribution(), stats.total));

    println!("\nLast 14 days");
    print!("{}", painter.trend(&dash.trend(Local::now().date_naive(), &Local)));

    let rows = if role == Role::Gate {
        println!("\nRecent scans");
        dash.recent_scans()
    } else {
        println!("\nGatepasses");
        dash.visible()
    };
    print!("{}", painter.table(&rows));

    let total = dash.filtered().len();
    println!("Showing {} of {}", dash.visible().len(), total);
    if dash.has_more() {
        println!("{} more ({} in the next batch)", dash.remaining(), dash.next_batch());
    }
    Ok(())
}

async fn animate_kpis(
    painter: &Painter,
    cards: &[gatepass_console::KpiCard],
    finals: &[u64],
    duration: std::time::Duration,
) -> Result<()> {
    let frames: Vec<Vec<u64>> = finals
        .iter()
        .map(|target| CountUp::new(*target, duration).frames(ANIMATION_FRAMES))
        .collect();
    let tick = duration / ANIMATION_FRAMES;
    let mut stdout = io::stdout();

    for i in 0..=ANIMATION_FRAMES as usize {
        let values: Vec<u64> = frames.iter().map(|f| f[i]).collect();
        if i > 0 {
            write!(stdout, "\x1b[{}A", cards.len())?;
        }
        write!(stdout, "{}", painter.kpis(cards, &values))?;
        stdout.flush()?;
        if i < ANIMATION_FRAMES as usize {
            tokio::time::sleep(tick).await;
        }
    }
    Ok(())
}

fn save(download: &Download, path: &Path) -> Result<()> {
    std::fs::write(path, &download.bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), size = download.len(), "download saved");
    println!("Saved {} ({} bytes)", path.display(), download.len());
    Ok(())
}
