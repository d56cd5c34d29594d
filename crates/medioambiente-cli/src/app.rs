//! Command handlers.
//!
//! Every handler follows the same shape: build the request, await it, then
//! print either a display model or the error message.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use medioambiente_core::models::{AreaProtegida, SobreNosotros, Voluntario};
use medioambiente_core::validation;
use medioambiente_core::{AuthService, Config};

use crate::cli::Command;
use crate::display;

/// Largest photo accepted for a report, before base64
const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct App {
    config: Config,
    auth: AuthService,
    output: OutputMode,
}

impl App {
    pub fn new(config: Config, output: OutputMode) -> Result<Self> {
        let api = config.api_client()?;
        let sessions = config.session_store()?;
        let mut auth = AuthService::new(api, sessions);
        auth.initialize();
        debug!(authenticated = auth.is_authenticated(), "Session loaded");

        Ok(Self {
            config,
            auth,
            output,
        })
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { email, password } => self.login(email, password).await,
            Command::Logout => {
                self.logout();
                Ok(())
            }
            Command::Whoami => self.whoami(),
            Command::Recover { email } => self.recover(&email).await,
            Command::ChangePassword => self.change_password().await,
            Command::Register {
                cedula,
                nombre,
                correo,
                telefono,
            } => {
                self.register(Voluntario {
                    cedula,
                    nombre,
                    correo,
                    clave: String::new(),
                    telefono,
                })
                .await
            }
            Command::News => {
                let news = self.auth.api().fetch_news().await?;
                self.print_list(&news, display::news_item)
            }
            Command::Videos => {
                let videos = self.auth.api().fetch_videos().await?;
                self.print_list(&videos, display::video)
            }
            Command::Areas { id: Some(id), .. } => {
                let area = self.auth.api().fetch_protected_area(id).await?;
                self.print_one(&area, display::area_detail)
            }
            Command::Areas { id: None, search } => {
                let areas = self.auth.api().fetch_protected_areas().await?;
                let query = search.unwrap_or_default();
                let areas: Vec<AreaProtegida> =
                    areas.into_iter().filter(|a| a.matches(&query)).collect();
                self.print_list(&areas, display::area_summary)
            }
            Command::AreaMap => {
                let areas = self.auth.api().fetch_protected_areas().await?;
                self.print_list(&areas, display::area_marker)
            }
            Command::Measures { id: Some(id) } => {
                let measure = self.auth.api().fetch_measure(id).await?;
                self.print_one(&measure, |m| display::measure(m, true))
            }
            Command::Measures { id: None } => {
                let measures = self.auth.api().fetch_measures().await?;
                self.print_list(&measures, |m| display::measure(m, false))
            }
            Command::Services => {
                let services = self.auth.api().fetch_services().await?;
                self.print_list(&services, display::service)
            }
            Command::Staff => {
                let staff = self.auth.api().fetch_staff().await?;
                self.print_list(&staff, display::staff)
            }
            Command::About => self.print_one(&SobreNosotros::ministerio(), display::about),
            Command::Regulations => {
                let regulations = self.auth.authorized_client()?.fetch_regulations().await?;
                self.print_list(&regulations, display::regulation)
            }
            Command::Reports { id: Some(id) } => {
                let report = self.auth.authorized_client()?.fetch_report(id).await?;
                self.print_one(&report, display::report_detail)
            }
            Command::Reports { id: None } => {
                let reports = self.auth.authorized_client()?.fetch_reports().await?;
                self.print_list(&reports, display::report_summary)
            }
            Command::ReportMap => {
                let reports = self.auth.authorized_client()?.fetch_reports().await?;
                self.print_list(&reports, display::report_marker)?;
                if self.output == OutputMode::Text && !reports.is_empty() {
                    println!("\n{}", display::status_legend(&reports));
                }
                Ok(())
            }
            Command::Report {
                title,
                description,
                photo,
                lat,
                lon,
            } => self.submit_report(&title, &description, &photo, lat, lon).await,
        }
    }

    // ===== Account =====

    async fn login(&mut self, email: Option<String>, password: Option<String>) -> Result<()> {
        let email = match email.or_else(|| self.config.last_email.clone()) {
            Some(email) => email,
            None => prompt_line("Correo electrónico: ")?,
        };
        let password = match password {
            Some(password) => password,
            None => rpassword::prompt_password("Contraseña: ")
                .context("Failed to read password")?,
        };

        validation::validate_login(&email, &password)?;
        let usuario = self.auth.login(email.trim(), password.trim()).await?;
        println!("Sesión iniciada correctamente. Bienvenido, {}.", usuario.display_name());

        if self.config.last_email.as_deref() != Some(email.trim()) {
            self.config.last_email = Some(email.trim().to_string());
            if let Err(e) = self.config.save() {
                warn!(error = %e, "Failed to remember email");
            }
        }
        Ok(())
    }

    fn logout(&mut self) {
        let was_authenticated = self.auth.is_authenticated();
        self.auth.logout();
        if was_authenticated {
            println!("Sesión cerrada.");
        } else {
            println!("No había una sesión iniciada.");
        }
    }

    fn whoami(&self) -> Result<()> {
        match self.auth.usuario() {
            Some(usuario) => self.print_one(usuario, display::user),
            None => {
                println!("No ha iniciado sesión.");
                Ok(())
            }
        }
    }

    async fn recover(&self, email: &str) -> Result<()> {
        validation::validate_recovery_email(email)?;
        let mensaje = self.auth.recover_password(email.trim()).await?;
        println!("{}", mensaje);
        Ok(())
    }

    async fn change_password(&self) -> Result<()> {
        if !self.auth.is_authenticated() {
            anyhow::bail!("Debe iniciar sesión");
        }
        let actual = rpassword::prompt_password("Contraseña actual: ")?;
        let nueva = rpassword::prompt_password("Nueva contraseña: ")?;
        let confirmacion = rpassword::prompt_password("Confirmar contraseña: ")?;

        validation::validate_password_change(&actual, &nueva, &confirmacion)?;
        let mensaje = self.auth.change_password(&actual, &nueva).await?;
        println!("{}", mensaje);
        Ok(())
    }

    async fn register(&self, mut voluntario: Voluntario) -> Result<()> {
        voluntario.clave = rpassword::prompt_password("Contraseña: ")?;
        validation::validate_volunteer(&voluntario)?;

        let response = self.auth.api().register_volunteer(&voluntario).await?;
        println!("{}", response.message().unwrap_or("Registro completado"));
        Ok(())
    }

    // ===== Reports =====

    async fn submit_report(
        &self,
        title: &str,
        description: &str,
        photo: &Path,
        lat: f64,
        lon: f64,
    ) -> Result<()> {
        let client = self.auth.authorized_client()?;
        let foto = read_photo(photo)?;
        let reporte = validation::build_report(title, description, Some(foto), Some(lat), Some(lon))?;

        info!(bytes = reporte.foto.len(), "Submitting report");
        let response = client.submit_report(&reporte).await?;
        println!("{}", response.message().unwrap_or("Reporte enviado"));
        Ok(())
    }

    // ===== Output =====

    fn print_list<T, F>(&self, items: &[T], render: F) -> Result<()>
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        match self.output {
            OutputMode::Json => println!("{}", serde_json::to_string_pretty(items)?),
            OutputMode::Text if items.is_empty() => println!("No hay resultados."),
            OutputMode::Text => {
                for item in items {
                    println!("{}\n", render(item));
                }
            }
        }
        Ok(())
    }

    fn print_one<T, F>(&self, item: &T, render: F) -> Result<()>
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        match self.output {
            OutputMode::Json => println!("{}", serde_json::to_string_pretty(item)?),
            OutputMode::Text => println!("{}", render(item)),
        }
        Ok(())
    }
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn read_photo(path: &Path) -> Result<Vec<u8>> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("No se pudo leer la foto {}", path.display()))?
        .len();
    if size > MAX_PHOTO_BYTES {
        anyhow::bail!(
            "La foto es demasiado grande ({} MB, máximo {} MB)",
            size / (1024 * 1024),
            MAX_PHOTO_BYTES / (1024 * 1024)
        );
    }
    std::fs::read(path).with_context(|| format!("No se pudo leer la foto {}", path.display()))
}
