//! Interactive menu controller
//!
//! A single-threaded prompt/act loop. The loop is the one recovery
//! point: every error from an action is printed and the loop continues.
//! The currently selected project is explicit session state threaded
//! through each action, never a field on the controller.

use craftplan_core::domain::materials::MaterialDraft;
use craftplan_core::domain::projects::{Project, ProjectDraft, ProjectService, ProjectUpdate};
use craftplan_core::storage::mapper::DECIMAL_SCALE;
use craftplan_core::{Error, Result};
use rust_decimal::Decimal;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fmt::Write as _;
use std::str::FromStr;

const OPERATIONS: &[&str] = &[
    "1) Add a project",
    "2) List projects",
    "3) Select a project",
    "4) Update project details",
    "5) Delete a project",
    "6) Add a material to the selected project",
    "7) Add a step to the selected project",
    "8) Add a category to the selected project",
];

/// Session state threaded through the menu actions
#[derive(Default)]
struct Session {
    current: Option<Project>,
}

pub struct Menu {
    editor: DefaultEditor,
    service: ProjectService,
}

impl Menu {
    pub fn new(service: ProjectService) -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            service,
        })
    }

    /// Display the menu, read a selection, and act on it until the user
    /// quits with a blank selection (or end of input).
    pub async fn run(mut self) -> Result<()> {
        let mut session = Session::default();

        loop {
            self.print_operations(&session);

            match self.read_selection() {
                Ok(None) => {
                    println!("Exiting the menu.");
                    return Ok(());
                }
                Ok(Some(selection)) => {
                    if let Err(err) = self.dispatch(selection, &mut session).await {
                        println!("\nError: {err} Try again.");
                    }
                }
                Err(err) => println!("\nError: {err} Try again."),
            }
        }
    }

    async fn dispatch(&mut self, selection: i32, session: &mut Session) -> Result<()> {
        tracing::debug!(selection, "dispatching menu selection");
        match selection {
            1 => self.create_project().await,
            2 => self.list_projects().await,
            3 => self.select_project(session).await,
            4 => self.update_project_details(session).await,
            5 => self.delete_project(session).await,
            6 => self.add_material(session).await,
            7 => self.add_step(session).await,
            8 => self.add_category(session).await,
            other => {
                println!("\n{other} is not a valid selection. Try again.");
                Ok(())
            }
        }
    }

    fn print_operations(&self, session: &Session) {
        println!("\nThese are the available selections. Press the Enter key to quit:");
        for operation in OPERATIONS {
            println!("  {operation}");
        }

        match &session.current {
            Some(project) => {
                println!("\nYou are working with project:\n{}", project_details(project));
            }
            None => println!("\nYou are not working with a project."),
        }
    }

    async fn create_project(&mut self) -> Result<()> {
        let name = self.require_line("Enter the project name", "project name")?;
        let estimated_hours = self.prompt_decimal("Enter the estimated hours")?;
        let actual_hours = self.prompt_decimal("Enter the actual hours")?;
        let difficulty = self.prompt_int("Enter the project difficulty (1-5)")?;
        let notes = self.read_line("Enter the project notes")?;

        let draft = ProjectDraft {
            name,
            estimated_hours,
            actual_hours,
            difficulty,
            notes,
        };
        let created = self.service.add_project(&draft).await?;
        println!(
            "\nYou have successfully created project: {}: {}",
            created.id, created.name
        );
        Ok(())
    }

    async fn list_projects(&mut self) -> Result<()> {
        let projects = self.service.fetch_all_projects().await?;

        println!("\nProjects");
        for project in &projects {
            println!("  {}: {}", project.id, project.name);
        }
        Ok(())
    }

    async fn select_project(&mut self, session: &mut Session) -> Result<()> {
        self.list_projects().await?;
        let id = self.require_int("Enter a project ID to select a project", "project ID")?;

        // Unselect first: a failed selection leaves nothing selected
        session.current = None;
        session.current = Some(self.service.fetch_project_by_id(id).await?);
        Ok(())
    }

    async fn update_project_details(&mut self, session: &mut Session) -> Result<()> {
        let Some(current) = session.current.clone() else {
            println!("\nPlease select a project.");
            return Ok(());
        };

        let name = self.read_line(&format!("Enter the project name [{}]", current.name))?;
        let estimated_hours = self.prompt_decimal(&format!(
            "Enter the estimated hours [{}]",
            display_opt(&current.estimated_hours)
        ))?;
        let actual_hours = self.prompt_decimal(&format!(
            "Enter the actual hours [{}]",
            display_opt(&current.actual_hours)
        ))?;
        let difficulty = self.prompt_int(&format!(
            "Enter the project difficulty (1-5) [{}]",
            display_opt(&current.difficulty)
        ))?;
        let notes = self.read_line(&format!(
            "Enter the project notes [{}]",
            display_opt(&current.notes)
        ))?;

        let update = merge_update(&current, name, estimated_hours, actual_hours, difficulty, notes);
        self.service.modify_project_details(&update).await?;

        session.current = Some(self.service.fetch_project_by_id(current.id).await?);
        Ok(())
    }

    async fn delete_project(&mut self, session: &mut Session) -> Result<()> {
        self.list_projects().await?;
        let id = self.require_int("Enter the ID of the project to delete", "project ID")?;

        self.service.delete_project(id).await?;
        println!("Project {id} was deleted successfully.");

        if session.current.as_ref().is_some_and(|p| p.id == id) {
            session.current = None;
        }
        Ok(())
    }

    async fn add_material(&mut self, session: &mut Session) -> Result<()> {
        let Some(current) = session.current.clone() else {
            println!("\nPlease select a project.");
            return Ok(());
        };

        let name = self.require_line("Enter the material name", "material name")?;
        let cost = self.prompt_decimal("Enter the material cost")?;
        let num_required = self.prompt_int("Enter the number required")?;

        self.service
            .add_material(
                current.id,
                &MaterialDraft {
                    name,
                    cost,
                    num_required,
                },
            )
            .await?;

        session.current = Some(self.service.fetch_project_by_id(current.id).await?);
        Ok(())
    }

    async fn add_step(&mut self, session: &mut Session) -> Result<()> {
        let Some(current) = session.current.clone() else {
            println!("\nPlease select a project.");
            return Ok(());
        };

        let text = self.require_line("Enter the step text", "step text")?;
        self.service.add_step(current.id, &text).await?;

        session.current = Some(self.service.fetch_project_by_id(current.id).await?);
        Ok(())
    }

    async fn add_category(&mut self, session: &mut Session) -> Result<()> {
        let Some(current) = session.current.clone() else {
            println!("\nPlease select a project.");
            return Ok(());
        };

        let categories = self.service.fetch_categories().await?;
        if !categories.is_empty() {
            println!("\nCategories");
            for category in &categories {
                println!("  {}", category.name);
            }
        }

        let name = self.require_line("Enter the category name", "category name")?;
        self.service.add_category_to_project(current.id, &name).await?;

        session.current = Some(self.service.fetch_project_by_id(current.id).await?);
        Ok(())
    }

    /// Read the menu selection. Blank input (or end of input) is the
    /// exit sentinel.
    fn read_selection(&mut self) -> Result<Option<i32>> {
        let input = self.read_line("Enter a menu selection")?;
        input.map(|text| parse_int(&text)).transpose()
    }

    /// Lowest-level input method. Prompts with `<label>: ` and treats
    /// blank or whitespace-only input as "no value provided".
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(&format!("{prompt}: ")) {
            Ok(line) => {
                let trimmed = line.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(Error::Io(std::io::Error::other(err.to_string()))),
        }
    }

    fn require_line(&mut self, prompt: &str, expected: &'static str) -> Result<String> {
        self.read_line(prompt)?.ok_or(Error::InvalidInput {
            input: String::new(),
            expected,
        })
    }

    fn prompt_int(&mut self, prompt: &str) -> Result<Option<i32>> {
        let input = self.read_line(prompt)?;
        input.map(|text| parse_int(&text)).transpose()
    }

    fn require_int(&mut self, prompt: &str, expected: &'static str) -> Result<i64> {
        let value = self.prompt_int(prompt)?.ok_or(Error::InvalidInput {
            input: String::new(),
            expected,
        })?;
        Ok(i64::from(value))
    }

    fn prompt_decimal(&mut self, prompt: &str) -> Result<Option<Decimal>> {
        let input = self.read_line(prompt)?;
        input.map(|text| parse_decimal(&text)).transpose()
    }
}

fn parse_int(input: &str) -> Result<i32> {
    input.parse().map_err(|_| Error::InvalidInput {
        input: input.to_string(),
        expected: "number",
    })
}

fn parse_decimal(input: &str) -> Result<Decimal> {
    let mut value = Decimal::from_str(input).map_err(|_| Error::InvalidInput {
        input: input.to_string(),
        expected: "decimal number",
    })?;
    value.rescale(DECIMAL_SCALE);
    Ok(value)
}

/// Keep the previous value for every field the user left blank
fn merge_update(
    current: &Project,
    name: Option<String>,
    estimated_hours: Option<Decimal>,
    actual_hours: Option<Decimal>,
    difficulty: Option<i32>,
    notes: Option<String>,
) -> ProjectUpdate {
    ProjectUpdate {
        id: current.id,
        name: name.unwrap_or_else(|| current.name.clone()),
        estimated_hours: estimated_hours.or(current.estimated_hours),
        actual_hours: actual_hours.or(current.actual_hours),
        difficulty: difficulty.or(current.difficulty),
        notes: notes.or_else(|| current.notes.clone()),
    }
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn project_details(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}: {}", project.id, project.name);
    let _ = writeln!(
        out,
        "    Estimated hours: {}",
        display_opt(&project.estimated_hours)
    );
    let _ = writeln!(out, "    Actual hours: {}", display_opt(&project.actual_hours));
    let _ = writeln!(out, "    Difficulty: {}", display_opt(&project.difficulty));
    let _ = writeln!(out, "    Notes: {}", display_opt(&project.notes));

    if !project.materials.is_empty() {
        let _ = writeln!(out, "    Materials:");
        for material in &project.materials {
            let _ = writeln!(
                out,
                "      {} (cost {}, required {})",
                material.name,
                display_opt(&material.cost),
                display_opt(&material.num_required)
            );
        }
    }
    if !project.steps.is_empty() {
        let _ = writeln!(out, "    Steps:");
        for step in &project.steps {
            let _ = writeln!(out, "      {}. {}", step.step_order, step.text);
        }
    }
    if !project.categories.is_empty() {
        let _ = writeln!(out, "    Categories:");
        for category in &project.categories {
            let _ = writeln!(out, "      {}", category.name);
        }
    }

    out.trim_end().to_string()
}
