use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client_core::{
    api::ApiClient,
    form::{Slider, SubmitOutcome, SymptomForm},
    table::{Column, SortDirection, DEFAULT_PAGE_SIZE},
    DashboardClient,
};
use shared::domain::CervicalMucus;
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8000/api")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the dashboard and print one page of the reconciled table.
    Table {
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// column=needle, repeatable
        #[arg(long)]
        filter: Vec<String>,
        /// column or column:desc, repeatable
        #[arg(long)]
        sort: Vec<String>,
    },
    /// Print the hormone series the chart drawer shows.
    Chart,
    /// Log symptoms for a date, creating or updating that day's entry.
    Log {
        date: NaiveDate,
        #[arg(long)]
        cramps: Option<u8>,
        #[arg(long)]
        bloating: Option<u8>,
        #[arg(long)]
        tender_breasts: Option<u8>,
        #[arg(long)]
        headache: Option<u8>,
        #[arg(long)]
        acne: Option<u8>,
        #[arg(long)]
        mood: Option<u8>,
        #[arg(long)]
        stress: Option<u8>,
        #[arg(long)]
        energy: Option<u8>,
        #[arg(long)]
        sleep_quality: Option<u8>,
        #[arg(long)]
        libido: Option<u8>,
        #[arg(long)]
        cervical_mucus: Option<CervicalMucus>,
        #[arg(long)]
        notes: Option<String>,
    },
}

fn parse_column(name: &str) -> Result<Column> {
    let column = match name.to_lowercase().as_str() {
        "cycle-day" | "cycle_day" => Column::CycleDay,
        "phase" => Column::Phase,
        "status" => Column::Status,
        "estrogen" | "estrogen-level" => Column::EstrogenLevel,
        "progesterone" | "progesterone-level" => Column::ProgesteroneLevel,
        "symptoms" => Column::Symptoms,
        "reviewer" => Column::Reviewer,
        other => bail!("unknown column: {other}"),
    };
    Ok(column)
}

fn parse_filter(raw: &str) -> Result<(Column, String)> {
    let Some((name, needle)) = raw.split_once('=') else {
        bail!("filter must look like column=needle, got {raw:?}");
    };
    Ok((parse_column(name)?, needle.to_string()))
}

fn parse_sort(raw: &str) -> Result<(Column, SortDirection)> {
    let (name, direction) = match raw.split_once(':') {
        Some((name, "asc")) => (name, SortDirection::Ascending),
        Some((name, "desc")) => (name, SortDirection::Descending),
        Some((_, other)) => bail!("sort direction must be asc or desc, got {other:?}"),
        None => (raw, SortDirection::Ascending),
    };
    Ok((parse_column(name)?, direction))
}

async fn print_table(
    server_url: String,
    page: usize,
    page_size: usize,
    filter: Vec<String>,
    sort: Vec<String>,
) -> Result<()> {
    let client = DashboardClient::new(server_url);
    client.refresh().await?;

    for raw in &filter {
        let (column, needle) = parse_filter(raw)?;
        client.set_filter(column, needle).await;
    }
    if !sort.is_empty() {
        let mut keys = Vec::with_capacity(sort.len());
        for raw in &sort {
            keys.push(parse_sort(raw)?);
        }
        client.set_sort(keys).await;
    }
    client.set_page_size(page_size).await;
    client.set_page(page).await;

    let snapshot = client.snapshot().await;
    info!(
        rows = snapshot.filtered_count,
        page = snapshot.page_index,
        "dashboard refreshed"
    );
    let columns = snapshot.visible_columns;
    let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
    println!("{}", headers.join(" | "));
    for row in &snapshot.rows {
        let cells: Vec<String> = columns.iter().map(|c| c.cell_text(row)).collect();
        println!("{}", cells.join(" | "));
    }
    println!(
        "page {}/{} ({} rows after filters)",
        snapshot.page_index + 1,
        snapshot.page_count.max(1),
        snapshot.filtered_count
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    match cli.command {
        Command::Table {
            page,
            page_size,
            filter,
            sort,
        } => {
            print_table(cli.server_url, page, page_size, filter, sort).await?;
        }
        Command::Chart => {
            let client = DashboardClient::new(cli.server_url);
            for point in client.load_chart().await? {
                println!(
                    "{}: estrogen={:.2} progesterone={:.2}",
                    point.day, point.estrogen, point.progesterone
                );
            }
        }
        Command::Log {
            date,
            cramps,
            bloating,
            tender_breasts,
            headache,
            acne,
            mood,
            stress,
            energy,
            sleep_quality,
            libido,
            cervical_mucus,
            notes,
        } => {
            let api = ApiClient::new(cli.server_url);
            let mut form = SymptomForm::new(date);
            form.load_for_date(&api, date).await?;

            let sliders = [
                (Slider::Cramps, cramps),
                (Slider::Bloating, bloating),
                (Slider::TenderBreasts, tender_breasts),
                (Slider::Headache, headache),
                (Slider::Acne, acne),
                (Slider::Mood, mood),
                (Slider::Stress, stress),
                (Slider::Energy, energy),
                (Slider::SleepQuality, sleep_quality),
                (Slider::Libido, libido),
            ];
            for (slider, value) in sliders {
                if let Some(value) = value {
                    form.set_level(slider, value);
                }
            }
            if let Some(mucus) = cervical_mucus {
                form.cervical_mucus = mucus;
            }
            if let Some(notes) = notes {
                form.notes = notes;
            }

            info!(%date, "submitting symptom log");
            match form.submit(&api).await? {
                SubmitOutcome::Created(id) => println!("created entry id={}", id.0),
                SubmitOutcome::Updated(id) => println!("updated entry id={}", id.0),
            }
        }
    }

    Ok(())
}
