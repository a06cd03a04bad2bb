use clap::{Args, Parser, Subcommand};
use maud::html;
use officina::admin::{AdminSession, Notice, NoticeLevel};
use officina::capacity::CapacityTable;
use officina::config::{self, StudioConfig};
use officina::crud::{Confirmation, TestimonialDraft};
use officina::exchange::{self, ExportFile};
use officina::site::{self, GalleryGrid, TestimonialsSection};
use officina::output;
use officina::types::{Category, PhotoSize, Platform};
use officina::upload::PendingFile;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "officina")]
#[command(about = "Content admin for a jewelry workshop site")]
#[command(long_about = "\
Content admin for a jewelry workshop site

Edits the two JSON documents the public site reads:

  config/gallery-items.json    photos per category (gemme, anelli, collane,
                               orecchini, altro)
  config/testimonials.json     customer reviews

Documents are never written in place. Every change is exported into the
export directory; copy the exported file over the published one to go live.
The photo file itself is not copied either: put it under the image prefix
(images/gallery/ by default) yourself.

Run 'officina gen-config' to generate a documented officina.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "officina.toml", global = true)]
    config: PathBuf,

    /// Gallery document (overrides paths.gallery_document)
    #[arg(long, global = true)]
    gallery: Option<PathBuf>,

    /// Testimonials document (overrides paths.testimonials_document)
    #[arg(long, global = true)]
    testimonials: Option<PathBuf>,

    /// Where exported documents are written
    #[arg(long, default_value = "export", global = true)]
    export_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage gallery photos
    #[command(subcommand)]
    Gallery(GalleryCommand),
    /// Manage customer testimonials
    #[command(subcommand)]
    Testimonials(TestimonialsCommand),
    /// Public site views
    #[command(subcommand)]
    Site(SiteCommand),
    /// Print a stock officina.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct CategoryArg {
    /// gemme, anelli, collane, orecchini or altro
    #[arg(long, default_value = "gemme")]
    category: Category,
}

#[derive(Args)]
struct DeleteArgs {
    /// Position as shown by `list` (1-based)
    #[arg(long, value_parser = parse_position)]
    index: usize,

    /// Confirm the deletion; without it nothing is removed
    #[arg(long)]
    yes: bool,
}

#[derive(Subcommand)]
enum GalleryCommand {
    /// List photos of a category with its counter
    List(CategoryArg),
    /// Add a photo and export the gallery document
    Add {
        #[command(flatten)]
        category: CategoryArg,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// normal, tall or wide
        #[arg(long, default_value = "normal")]
        size: String,
        /// Image file to attach
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a photo and export the gallery document
    Delete {
        #[command(flatten)]
        category: CategoryArg,
        #[command(flatten)]
        delete: DeleteArgs,
    },
    /// Export the gallery document unchanged
    Export,
    /// Print the admin table of a category as HTML
    Render(CategoryArg),
}

#[derive(Subcommand)]
enum TestimonialsCommand {
    /// List testimonials
    List,
    /// Add a testimonial and export the testimonials document
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        url: String,
        /// Review date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// 1 to 5
        #[arg(long, default_value_t = 5)]
        rating: i64,
        /// google, facebook, instagram, tripadvisor or trustpilot
        #[arg(long, default_value = "google")]
        platform: String,
    },
    /// Delete a testimonial and export the testimonials document
    Delete(DeleteArgs),
    /// Export the testimonials document unchanged
    Export,
    /// Print the admin table as HTML
    Render,
}

#[derive(Subcommand)]
enum SiteCommand {
    /// Render the public gallery grid, counter strip and testimonials
    Render,
}

/// `1` → row 0. Zero is rejected.
fn parse_position(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    n.checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        Command::Gallery(command) => {
            let config = load_config(&cli.config)?;
            let path = document_path(cli.gallery, &config.paths.gallery_document);
            let mut session = AdminSession::new(&config);
            output::print_notice(&session.load_gallery(&path));
            run_gallery(command, &mut session, &cli.export_dir)?;
        }
        Command::Testimonials(command) => {
            let config = load_config(&cli.config)?;
            let path = document_path(cli.testimonials, &config.paths.testimonials_document);
            let mut session = AdminSession::new(&config);
            output::print_notice(&session.load_testimonials(&path));
            run_testimonials(command, &mut session, &cli.export_dir)?;
        }
        Command::Site(SiteCommand::Render) => {
            let config = load_config(&cli.config)?;
            let gallery = document_path(cli.gallery, &config.paths.gallery_document);
            let testimonials =
                document_path(cli.testimonials, &config.paths.testimonials_document);
            render_site(&config, &gallery, &testimonials)?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<StudioConfig, Box<dyn Error>> {
    let config = config::load_config(path)?;
    tracing::debug!(config = %path.display(), "configuration loaded");
    Ok(config)
}

/// The command-line flag wins over the configured path.
fn document_path(flag: Option<PathBuf>, configured: &str) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(configured))
}

fn run_gallery(
    command: GalleryCommand,
    session: &mut AdminSession,
    export_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    match command {
        GalleryCommand::List(CategoryArg { category }) => {
            session.select_category(category);
            output::print_gallery(&session.store().gallery, category, &session.counter());
        }
        GalleryCommand::Add {
            category: CategoryArg { category },
            title,
            description,
            size,
            file,
        } => {
            session.select_category(category);
            session.set_title(title);
            session.set_description(description);
            session.set_size(PhotoSize::from(size));
            session.stage_file(PendingFile::read(&file)?);
            finish(&session.add_photo())?;
            export(session.export_gallery()?, session, export_dir)?;
        }
        GalleryCommand::Delete {
            category: CategoryArg { category },
            delete,
        } => {
            session.select_category(category);
            match session.delete_photo(delete.index, Confirmation::from(delete.yes)) {
                Some(notice) => {
                    finish(&notice)?;
                    export(session.export_gallery()?, session, export_dir)?;
                }
                None => println!("Nothing deleted; pass --yes to confirm"),
            }
        }
        GalleryCommand::Export => {
            export(session.export_gallery()?, session, export_dir)?;
        }
        GalleryCommand::Render(CategoryArg { category }) => {
            session.select_category(category);
            let page = html! {
                (session.render_counter())
                (session.render_gallery())
            };
            println!("{}", page.into_string());
        }
    }
    Ok(())
}

fn run_testimonials(
    command: TestimonialsCommand,
    session: &mut AdminSession,
    export_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    match command {
        TestimonialsCommand::List => {
            output::print_testimonials(&session.store().testimonials);
        }
        TestimonialsCommand::Add {
            name,
            text,
            url,
            date,
            rating,
            platform,
        } => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format(officina::validate::REVIEW_DATE_FORMAT)
                    .to_string()
            });
            let draft = TestimonialDraft {
                name,
                text,
                url,
                date,
                rating,
                platform: Platform::from(platform),
            };
            finish(&session.add_testimonial(&draft))?;
            export(session.export_testimonials()?, session, export_dir)?;
        }
        TestimonialsCommand::Delete(delete) => {
            match session.delete_testimonial(delete.index, Confirmation::from(delete.yes)) {
                Some(notice) => {
                    finish(&notice)?;
                    export(session.export_testimonials()?, session, export_dir)?;
                }
                None => println!("Nothing deleted; pass --yes to confirm"),
            }
        }
        TestimonialsCommand::Export => {
            export(session.export_testimonials()?, session, export_dir)?;
        }
        TestimonialsCommand::Render => {
            println!("{}", session.render_testimonials().into_string());
        }
    }
    Ok(())
}

/// Print the notice; an error notice ends the command with a failure.
fn finish(notice: &Notice) -> Result<(), Box<dyn Error>> {
    output::print_notice(notice);
    if notice.level == NoticeLevel::Error {
        return Err(notice.text.clone().into());
    }
    Ok(())
}

fn export(file: ExportFile, session: &AdminSession, dir: &Path) -> Result<(), Box<dyn Error>> {
    let written = exchange::write_export(dir, &file)?;
    output::print_export(&file, &written);
    output::print_notice(&session.export_notice(&file));
    Ok(())
}

fn render_site(
    config: &StudioConfig,
    gallery_path: &Path,
    testimonials_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut grid = GalleryGrid::new(CapacityTable::site(&config.site), Vec::new());
    match exchange::read_document(gallery_path) {
        Ok(json) => {
            if let Err(err) = grid.merge_document(&json) {
                tracing::warn!(path = %gallery_path.display(), %err, "gallery document not merged");
            }
        }
        Err(err) => {
            tracing::warn!(path = %gallery_path.display(), %err, "gallery document not loaded")
        }
    }
    grid.init_load_more(config.site.initial_visible);

    let mut testimonials = TestimonialsSection::default();
    match exchange::read_document(testimonials_path) {
        Ok(json) => {
            if let Err(err) = testimonials.merge_document(&json) {
                tracing::warn!(path = %testimonials_path.display(), %err, "testimonials document not merged");
            }
        }
        Err(err) => {
            tracing::warn!(path = %testimonials_path.display(), %err, "testimonials document not loaded")
        }
    }

    let page = html! {
        section id="gallery" {
            (site::render_counter(&grid))
            (site::render_grid(&grid))
        }
        section id="testimonials" {
            (site::render_testimonials(&testimonials))
        }
    };
    println!("{}", page.into_string());
    Ok(())
}
