//! Life Expectancy CLI
//!
//! Command-line interface for residual life expectancy lookups and table export

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use life_expectancy::export::write_json_file;
use life_expectancy::table::ensure_birthdate_not_in_future;
use life_expectancy::{
    compute_residual_life_expectancy, render_grid, ExcelLifeExpectancyLoader, Gender, GridPayload,
    LifeExpectancyTable, LoaderConfig, DEFAULT_REFERENCE_YEAR, DEFAULT_WORKBOOK_PATH,
};

#[derive(Parser)]
#[command(name = "life-expectancy")]
#[command(version, about = "Residual life expectancy from an actuarial XLSX life table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the residual life expectancy for a birthdate and gender
    Compute {
        /// Birthdate (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        birthdate: NaiveDate,

        /// Gender: m, f, all, male, female or total
        #[arg(short, long)]
        gender: String,

        /// Date whose month/day is used in the reference year (default: today)
        #[arg(long, value_parser = parse_date)]
        reference_date: Option<NaiveDate>,

        /// Print the result as JSON instead of a grid
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Export the life table as JSON
    Export {
        /// Output file (default: life_expectancy_<reference year>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Show the reference year and age range of the life table
    Info {
        #[command(flatten)]
        table: TableArgs,
    },
}

#[derive(clap::Args)]
struct TableArgs {
    /// Input workbook (.xlsx)
    #[arg(short, long, default_value = DEFAULT_WORKBOOK_PATH)]
    workbook: PathBuf,

    /// Year the table's statistics refer to
    #[arg(short, long, default_value_t = DEFAULT_REFERENCE_YEAR)]
    reference_year: i32,
}

impl TableArgs {
    fn load(&self) -> Result<LifeExpectancyTable> {
        let config = LoaderConfig::with_reference_year(self.reference_year);
        ExcelLifeExpectancyLoader::with_config(&self.workbook, config)
            .load()
            .with_context(|| format!("Failed to load life table from {}", self.workbook.display()))
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    let value = value.trim();
    if value.len() != 10 {
        return Err(format!("{value:?} must be in YYYY-MM-DD format"));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{value:?} is not a valid date: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            birthdate,
            gender,
            reference_date,
            json,
            table,
        } => compute(&table, birthdate, &gender, reference_date, json),
        Commands::Export { output, table } => export(&table, output),
        Commands::Info { table } => info(&table),
    }
}

fn compute(
    args: &TableArgs,
    birthdate: NaiveDate,
    gender: &str,
    reference_date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    ensure_birthdate_not_in_future(birthdate, Local::now().date_naive())?;
    let gender = Gender::from_alias(gender)?;

    let table = args.load()?;
    let result = compute_residual_life_expectancy(&table, birthdate, gender.as_str(), reference_date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&GridPayload::from(&result))?);
    } else {
        println!("{}", render_grid(&result));
    }
    Ok(())
}

fn export(args: &TableArgs, output: Option<PathBuf>) -> Result<()> {
    let table = args.load()?;
    let output = output
        .unwrap_or_else(|| PathBuf::from(format!("life_expectancy_{}.json", table.reference_year())));

    write_json_file(&table, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Exported life expectancy data to {}", output.display());
    Ok(())
}

fn info(args: &TableArgs) -> Result<()> {
    let table = args.load()?;
    let (min_age, max_age) = table.age_bounds();

    println!("Workbook:       {}", args.workbook.display());
    println!("Reference year: {}", table.reference_year());
    println!("Entries:        {}", table.len());
    println!("Age range:      {min_age}-{max_age}");
    Ok(())
}
