use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use sqlx::PgPool;
use syllabus_cli::maintenance::{OrderingReport, check_ordering, normalize_report};
use syllabus_cli::seeder::{self, SeedConfig};
use syllabus_config::DatabaseConfig;
use syllabus_db::init_db_pool;

#[derive(Parser)]
#[command(name = "syllabus-cli")]
#[command(about = "Syllabus CLI - Seeding and ordering maintenance for Syllabus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake courses, modules, and lessons
    Seed {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "5")]
        courses: usize,

        /// Number of modules per course
        #[arg(short = 'm', long, default_value = "6")]
        modules: usize,

        /// Number of lessons per module
        #[arg(short = 'l', long, default_value = "8")]
        lessons: usize,
    },
    /// Delete all courses with their modules and lessons
    ClearSeed {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Report courses and modules whose positions are not 0..N
    Check,
    /// Renumber every course and module whose positions are not 0..N
    Normalize {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool(&DatabaseConfig::from_env()).await;

    match cli.command {
        Commands::Seed {
            courses,
            modules,
            lessons,
        } => handle_seed(&pool, courses, modules, lessons).await,
        Commands::ClearSeed { yes } => handle_clear_seed(&pool, yes).await,
        Commands::Check => handle_check(&pool).await,
        Commands::Normalize { yes } => handle_normalize(&pool, yes).await,
    }
}

fn confirm(prompt: &str, yes: bool) -> bool {
    yes || Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .expect("Failed to read confirmation")
}

async fn handle_seed(pool: &PgPool, courses: usize, modules: usize, lessons: usize) {
    let config = SeedConfig::new(courses)
        .with_modules(modules)
        .with_lessons(lessons);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {e}");
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool, yes: bool) {
    if !confirm("Delete ALL courses, modules and lessons?", yes) {
        println!("Aborted");
        return;
    }

    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {e}");
        std::process::exit(1);
    }
}

fn print_report(report: &OrderingReport) {
    for course_id in &report.courses {
        println!("   ✗ course {course_id}: module positions are not 0..N");
    }
    for module_id in &report.modules {
        println!("   ✗ module {module_id}: lesson positions are not 0..N");
    }
}

async fn load_report(pool: &PgPool) -> OrderingReport {
    match check_ordering(pool).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("\n❌ Error checking ordering: {e}");
            std::process::exit(1);
        }
    }
}

async fn handle_check(pool: &PgPool) {
    let report = load_report(pool).await;

    if report.is_clean() {
        println!("✅ All courses and modules are in order");
        return;
    }

    print_report(&report);
    println!(
        "\n⚠️  {} courses and {} modules need `normalize`",
        report.courses.len(),
        report.modules.len()
    );
    std::process::exit(2);
}

async fn handle_normalize(pool: &PgPool, yes: bool) {
    let report = load_report(pool).await;

    if report.is_clean() {
        println!("✅ Nothing to normalize");
        return;
    }

    print_report(&report);
    if !confirm("Renumber these lists, keeping their current relative order?", yes) {
        println!("Aborted");
        return;
    }

    match normalize_report(pool, &report).await {
        Ok(moved) => println!("✅ Renumbered {moved} rows"),
        Err(e) => {
            eprintln!("\n❌ Error normalizing: {e}");
            std::process::exit(1);
        }
    }
}
