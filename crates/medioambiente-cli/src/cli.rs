//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "medioambiente",
    version,
    about = "Ministerio de Medio Ambiente y Recursos Naturales (RD) - information and incident reports"
)]
pub struct Cli {
    /// Write logs to this directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print raw JSON instead of formatted text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with your volunteer account
    Login {
        /// Account email (defaults to the last one used)
        #[arg(long)]
        email: Option<String>,

        /// Password; prompted for when absent
        #[arg(long, env = "MEDIOAMBIENTE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Request a password reset email
    Recover {
        email: String,
    },

    /// Change your password (signed in)
    ChangePassword,

    /// Register as a volunteer
    Register {
        #[arg(long)]
        cedula: String,
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        correo: String,
        #[arg(long)]
        telefono: String,
    },

    /// Environmental news
    News,

    /// Educational videos
    Videos,

    /// Protected areas, or one area by id
    Areas {
        id: Option<i64>,

        /// Filter by name, type or location
        #[arg(long)]
        search: Option<String>,
    },

    /// Protected areas as map markers
    AreaMap,

    /// Environmental measures, or one measure by id
    Measures {
        id: Option<i64>,
    },

    /// Ministry services
    Services,

    /// Ministry staff
    Staff,

    /// History, mission, vision and values of the ministry
    About,

    /// Environmental regulations (signed in)
    Regulations,

    /// Your reports, or one report by id (signed in)
    Reports {
        id: Option<i64>,
    },

    /// Your reports as map markers (signed in)
    ReportMap,

    /// Submit an environmental incident report (signed in)
    Report {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Photo of the incident (JPEG or PNG)
        #[arg(long)]
        photo: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "medioambiente",
            "report",
            "--title",
            "Tala",
            "--description",
            "Árboles cortados",
            "--photo",
            "foto.jpg",
            "--lat",
            "18.48",
            "--lon",
            "-69.93",
        ])
        .expect("parse");
        match cli.command {
            Command::Report { lat, lon, .. } => {
                assert_eq!(lat, 18.48);
                assert_eq!(lon, -69.93);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_areas_with_search() {
        let cli = Cli::try_parse_from(["medioambiente", "--json", "areas", "--search", "parque"])
            .expect("parse");
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Areas { id: None, search: Some(ref s) } if s == "parque"
        ));
    }

    #[test]
    fn test_parse_static_and_map_commands() {
        let about = Cli::try_parse_from(["medioambiente", "about"]).expect("parse");
        assert!(matches!(about.command, Command::About));
        let map = Cli::try_parse_from(["medioambiente", "area-map"]).expect("parse");
        assert!(matches!(map.command, Command::AreaMap));
    }
}
