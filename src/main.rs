use clap::{Parser, Subcommand, ValueEnum};
use qtgen_core::{BUILD_PRESET_FILE, GenerateError, ProjectFormat, qt_creator};
use qtgen_project::ProjectError;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate Qt Creator projects from Unreal Engine projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the .pro, .pri and .pro.user files for a project
    Generate {
        /// Directory containing the .uproject file (defaults to the working directory)
        project_dir: Option<PathBuf>,

        /// Build preset template (defaults to qtBuildPreset.xml next to the executable)
        #[arg(long)]
        preset: Option<PathBuf>,

        /// Format of the engine generated project file
        #[arg(long, value_enum, default_value_t = FormatArg::Vcx)]
        format: FormatArg,

        /// Open the generated project in Qt Creator afterwards
        #[arg(long)]
        open: bool,

        /// Qt Creator executable used with --open
        #[arg(long)]
        qtcreator: Option<PathBuf>,
    },
    /// Store the Qt Creator environment and kit ids in the configuration
    Configure {
        /// Read the ids from this .pro.user file instead of launching Qt Creator
        #[arg(long)]
        user_file: Option<PathBuf>,

        /// Qt Creator executable (searched on PATH by default)
        #[arg(long)]
        qtcreator: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    /// Visual Studio .vcxproj
    Vcx,
}

impl From<FormatArg> for ProjectFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Vcx => ProjectFormat::VisualStudio,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), GenerateError> {
    let config_path = cli
        .config
        .or_else(qtgen_config::default_config_path)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    match cli.command {
        Command::Generate {
            project_dir,
            preset,
            format,
            open,
            qtcreator,
        } => {
            let preset_path = preset.unwrap_or_else(default_preset_path);
            let template = qtgen_core::load_preset(&preset_path)?;
            let config = qtgen_core::load_configuration(&config_path)?;

            let project_dir = match project_dir {
                Some(dir) => dir,
                None => std::env::current_dir().map_err(|source| ProjectError::DirRead {
                    path: PathBuf::from("."),
                    source,
                })?,
            };

            let files = qtgen_core::generate(&project_dir, format.into(), &config, &template)?;
            println!("Qt project generation successful: {}", files.pro_file.display());

            if open {
                let executable = qt_creator::find_executable(qtcreator.as_deref())?;
                qt_creator::open_project(&executable, &files.pro_file)?;
            }
        }
        Command::Configure {
            user_file,
            qtcreator,
        } => {
            let config = match user_file {
                Some(path) => qtgen_config::user_file::read_ids_from_path(path)?,
                None => {
                    let executable = qt_creator::find_executable(qtcreator.as_deref())?;
                    qt_creator::discover_ids(&executable)?
                }
            };
            qtgen_core::save_configuration(&config, &config_path)?;
            println!(
                "Environment id {} and kit id {} saved to {}",
                config.qt_environment_id,
                config.unreal_project_configuration_id,
                config_path.display()
            );
        }
    }

    Ok(())
}

fn default_preset_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUILD_PRESET_FILE)))
        .unwrap_or_else(|| PathBuf::from(BUILD_PRESET_FILE))
}
