//! Pricing Buddy CLI
//!
//! Command-line interface for working out a freelance hourly rate

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pricing_buddy::{
    market, Currency, CurrencyTable, ExperienceLevel, RateCalculator, CalculatorConfig, RateInputs,
    RateResult, RateWizard, WizardStep,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pricing_buddy", about = "Find your ideal hourly freelance rate", version)]
struct Cli {
    /// Currency table CSV (defaults to the built-in rates)
    #[arg(long, global = true)]
    currency_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate a rate from command-line figures
    Calc(CalcArgs),
    /// List hourly rate ranges of popular freelance platforms
    Benchmarks {
        /// Show ranges converted into this currency
        #[arg(long, default_value = "USD")]
        currency: Currency,
    },
    /// Walk through the calculator step by step
    Wizard {
        #[arg(long, default_value = "INR")]
        currency: Currency,
    },
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Monthly take-home income goal
    #[arg(long)]
    income: f64,
    /// Billable hours per week
    #[arg(long)]
    hours: f64,
    #[arg(long, default_value_t = 48.0)]
    weeks: f64,
    /// Monthly business expenses
    #[arg(long, default_value_t = 0.0)]
    expenses: f64,
    /// Market average hourly rate to blend with
    #[arg(long, conflicts_with = "benchmark")]
    market_rate: Option<f64>,
    /// Use a platform's midpoint as the market rate (fiverr, freelancer, upwork)
    #[arg(long)]
    benchmark: Option<String>,
    #[arg(long, default_value_t = 1.0, conflicts_with = "level")]
    experience: f64,
    /// Experience preset (junior, intermediate, senior, expert)
    #[arg(long)]
    level: Option<ExperienceLevel>,
    /// Buffer on top of the base rate (0.2 = 20%)
    #[arg(long, default_value_t = 0.2)]
    confidence: f64,
    #[arg(long, default_value = "INR")]
    currency: Currency,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let table = match &cli.currency_table {
        Some(path) => CurrencyTable::from_csv_path(path)
            .with_context(|| format!("loading currency table {}", path.display()))?,
        None => CurrencyTable::default_rates(),
    };
    let calculator = RateCalculator::new(table, CalculatorConfig::default());

    match cli.command {
        Command::Calc(args) => run_calc(&calculator, args),
        Command::Benchmarks { currency } => run_benchmarks(&calculator, currency),
        Command::Wizard { currency } => run_wizard(&calculator, currency),
    }
}

fn run_calc(calculator: &RateCalculator, args: CalcArgs) -> Result<()> {
    let mut inputs = RateInputs::new(args.income, args.hours, args.expenses)
        .with_weeks_per_year(args.weeks)
        .with_experience(args.experience)
        .with_confidence(args.confidence)
        .in_currency(args.currency);

    if let Some(level) = args.level {
        inputs = inputs.with_level(level);
    }

    inputs.market_average_rate = match (&args.benchmark, args.market_rate) {
        (Some(name), _) => {
            let benchmarks = market::default_benchmarks();
            let benchmark = market::find(&benchmarks, name)
                .with_context(|| format!("unknown platform benchmark: {}", name))?;
            let rate = benchmark
                .market_rate_in(args.currency, calculator.currencies())
                .with_context(|| format!("cannot convert {} benchmark into {}", benchmark.platform, args.currency))?;
            log::info!("using {} midpoint {:.2} {} as market rate", benchmark.platform, rate, args.currency);
            Some(rate)
        }
        (None, rate) => rate,
    };

    let result = calculator.compute(&inputs)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &RateResult) {
    let symbol = result.currency.symbol();
    println!("Pricing Buddy v0.1.0");
    println!("====================\n");
    println!("  Yearly income goal:   {}{:.2}", symbol, result.breakdown.yearly_income_goal);
    println!("  Yearly expenses:      {}{:.2}", symbol, result.breakdown.yearly_expenses);
    println!("  Working hours / year: {:.2}", result.breakdown.total_working_hours);
    println!();
    println!("  Base Rate:            {}{:.2} / hour", symbol, result.base_rate);
    println!("  Final Rate:           {}{:.2} / hour (experience & confidence)", symbol, result.final_rate);
    if result.market_blended {
        println!("  Suggested Rate:       {}{:.2} / hour (blended with market rate)", symbol, result.suggested_rate);
    } else {
        println!("  Suggested Rate:       {}{:.2} / hour", symbol, result.suggested_rate);
    }
    println!("  Weekly:               {}{:.2}", symbol, result.weekly_rate);
    println!("  Monthly (4 weeks):    {}{:.2}", symbol, result.monthly_rate);
}

fn run_benchmarks(calculator: &RateCalculator, currency: Currency) -> Result<()> {
    let table = calculator.currencies();
    println!("Freelance Hourly Rates ({})", currency);
    println!("{}", "-".repeat(60));

    for benchmark in market::default_benchmarks() {
        let convert = |amount: f64| {
            table
                .to_base(amount, benchmark.currency)
                .and_then(|base| table.from_base(base, currency))
        };
        let (Some(min), Some(max)) = (convert(benchmark.min_rate), convert(benchmark.max_rate)) else {
            bail!("no conversion rate between {} and {}", benchmark.currency, currency);
        };
        println!(
            "{:<16} {}{:.2} - {}{:.2} / hour   {}",
            benchmark.platform,
            currency.symbol(),
            min,
            currency.symbol(),
            max,
            benchmark.description
        );
    }

    if let Some(average) = market::average_midpoint(&market::default_benchmarks(), currency, table) {
        println!("\nAverage midpoint: {}{:.2} / hour", currency.symbol(), average);
    }
    Ok(())
}

fn run_wizard(calculator: &RateCalculator, currency: Currency) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut wizard = RateWizard::new(currency);

    loop {
        let step = wizard.step();
        println!("\n== {} ==", step.title());

        match step {
            WizardStep::Basics => {
                let symbol = wizard.currency().symbol();
                wizard.form.monthly_income_goal = prompt(&mut lines, &format!("Monthly income goal ({})", symbol), &wizard.form.monthly_income_goal)?;
                wizard.form.hours_per_week = prompt(&mut lines, "Hours per week", &wizard.form.hours_per_week)?;
                wizard.form.weeks_per_year = prompt(&mut lines, "Working weeks per year", &wizard.form.weeks_per_year)?;
                wizard.form.monthly_expenses = prompt(&mut lines, &format!("Monthly business expenses ({})", symbol), &wizard.form.monthly_expenses)?;
            }
            WizardStep::FineTune => {
                wizard.form.market_average_rate = prompt(&mut lines, "Market avg. rate (optional)", &wizard.form.market_average_rate)?;
                wizard.form.experience_multiplier = prompt(&mut lines, "Experience multiplier", &wizard.form.experience_multiplier)?;
                wizard.form.confidence_factor = prompt(&mut lines, "Confidence factor (0.2 = 20%)", &wizard.form.confidence_factor)?;
            }
            WizardStep::Results => {
                if let Some(result) = wizard.result() {
                    print_result(result);
                }
                let choice = prompt(&mut lines, "[c]urrency, [b]ack, [r]estart or [q]uit", "q")?;
                match choice.to_ascii_lowercase().as_str() {
                    "c" => {
                        let next = prompt(&mut lines, "Currency (INR/USD)", wizard.currency().code())?;
                        match next.parse::<Currency>() {
                            Ok(next) => {
                                if let Err(err) = wizard.set_currency(next, calculator) {
                                    println!("⚠️ {}", err);
                                }
                            }
                            Err(err) => println!("⚠️ {}", err),
                        }
                    }
                    "b" => {
                        wizard.back();
                    }
                    "r" => wizard.reset(),
                    _ => return Ok(()),
                }
                continue;
            }
        }

        if let Err(err) = wizard.advance(calculator) {
            println!("⚠️ Please fill all required fields with valid numbers: {}", err);
        }
    }
}

/// Ask for one value; an empty answer keeps the current one
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, label: &str, current: &str) -> Result<String> {
    print!("{} [{}]: ", label, current);
    io::stdout().flush()?;

    let line = match lines.next() {
        Some(line) => line.context("reading from stdin")?,
        None => bail!("input closed"),
    };
    let answer = line.trim();

    Ok(if answer.is_empty() { current.to_string() } else { answer.to_string() })
}
