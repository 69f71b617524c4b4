//! The command-script interpreter.

use crate::codec::files;
use crate::core::error::{CollagerError, CollagerResult, ModelError};
use crate::filters::FilterName;
use crate::project::Project;
use crate::session::config::SessionConfig;
use crate::session::reader::CommandReader;
use log::{debug, warn};
use std::io::{BufRead, Write};

const INVALID_COMMAND: &str = "Invalid command, type \"help\" for help.";
const NO_PROJECT_TO_SAVE: &str = "Cannot save a project that does not exist";

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs text commands against a [`Project`] and reports failures to an output sink.
///
/// A failing command prints its error message and the session carries on. Only a
/// broken output sink, an unreadable input, or input that ends in the middle of a
/// command stops the session with an error.
pub struct Session<W: Write> {
    project: Project,
    out: W,
    config: SessionConfig,
}

impl<W: Write> Session<W> {
    /// Create a session with the default configuration.
    pub fn new(out: W) -> Self {
        Self::with_config(out, SessionConfig::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(out: W, config: SessionConfig) -> Self {
        Self {
            project: Project::new(),
            out,
            config,
        }
    }

    /// The project the commands operate on.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consume the session and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run commands from `input` until it is exhausted or `quit` is read.
    pub fn run<R: BufRead>(&mut self, input: R) -> CollagerResult<()> {
        let mut reader = CommandReader::new(input);

        while let Some(command) = reader.next_token()? {
            if self.config.echo_commands {
                self.render(&format!("> {command}"))?;
            }
            debug!("Running command '{}'", command);

            if self.dispatch(&command.to_lowercase(), &mut reader)? == Flow::Quit {
                break;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn dispatch<R: BufRead>(
        &mut self,
        command: &str,
        args: &mut CommandReader<R>,
    ) -> CollagerResult<Flow> {
        match command {
            "new-project" => {
                let width = args.require()?;
                let height = args.require()?;
                match (width.parse::<usize>(), height.parse::<usize>()) {
                    (Ok(width), Ok(height)) => {
                        let result = self.project.create_project(height, width);
                        self.report(result)?;
                    }
                    _ => self.render(&usage("new-project"))?,
                }
            }
            "load-project" => {
                let path = args.require()?;
                let result = files::load_project(&path, &mut self.project);
                self.report(result)?;
            }
            "save-project" => {
                let path = args.require()?;
                if self.project.has_project() {
                    let result = files::save_project(&path, &self.project);
                    self.report(result)?;
                } else {
                    self.render(NO_PROJECT_TO_SAVE)?;
                }
            }
            "add-layer" => {
                let name = args.require()?;
                let result = self.project.add_layer(&name);
                self.report(result)?;
            }
            "add-image-to-layer" => {
                let name = args.require()?;
                let path = args.require()?;
                let x = args.require()?;
                let y = args.require()?;
                match (x.parse::<i64>(), y.parse::<i64>()) {
                    (Ok(x), Ok(y)) => {
                        let result = self.add_image(&name, &path, y, x);
                        self.report(result)?;
                    }
                    _ => self.render(&usage("add-image-to-layer"))?,
                }
            }
            "set-filter" => {
                let name = args.require()?;
                let filter = args.require()?;
                let result = self.project.set_filter(&name, &filter);
                self.report(result)?;
            }
            "save-image" => {
                let path = args.require()?;
                let layer = args.optional();
                let result = self.save_image(&path, layer.as_deref());
                self.report(result)?;
            }
            "help" => self.render(&help_text())?,
            "quit" => {
                self.render("Quit!")?;
                return Ok(Flow::Quit);
            }
            _ => self.render(INVALID_COMMAND)?,
        }

        Ok(Flow::Continue)
    }

    fn add_image(&mut self, name: &str, path: &str, y: i64, x: i64) -> CollagerResult<()> {
        if !self.project.has_project() {
            return Err(ModelError::NoProject.into());
        }
        let image = files::load_image(path)?;
        self.project.add_image(name, &image, y, x)?;
        Ok(())
    }

    fn save_image(&self, path: &str, layer: Option<&str>) -> CollagerResult<()> {
        let image = match layer {
            Some(name) => self.project.image_at_layer(name)?,
            None => self.project.final_image()?,
        };
        files::save_image(path, &image, self.config.jpeg_quality)?;
        Ok(())
    }

    fn report<E: Into<CollagerError>>(&mut self, result: Result<(), E>) -> CollagerResult<()> {
        if let Err(err) = result {
            let err = err.into();
            warn!("Command failed: {}", err);
            self.render(&err.to_string())?;
        }
        Ok(())
    }

    fn render(&mut self, message: &str) -> CollagerResult<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}

fn usage(command: &str) -> String {
    format!("Invalid arguments for command \"{command}\". Type \"help\" to see command usage.")
}

/// The text printed by the `help` command.
pub fn help_text() -> String {
    let mut text = String::from(
        "new-project CANVAS-WIDTH CANVAS-HEIGHT -- creates a blank project with the provided dimensions\n\
         \x20   CANVAS-WIDTH and CANVAS-HEIGHT must be integers\n\
         \x20   there are no layers by default\n\
         load-project PATH-TO-PROJECT-FILE -- loads a project from a .collage formatted file\n\
         save-project PATH-TO-PROJECT-FILE -- saves the project in the .collage format to the specified file\n\
         add-layer LAYER-NAME -- adds a layer to the project with the specified name\n\
         add-image-to-layer LAYER-NAME PATH-TO-IMAGE-FILE X-POS Y-POS -- adds a PPM, PNG or JPEG image to the specified layer at the specified coordinates\n\
         \x20   X-POS and Y-POS must be integers\n\
         set-filter LAYER-NAME FILTER-NAME -- sets the given layer to have the specified filter\n\
         \x20   available filters are:\n",
    );

    for filter in FilterName::all() {
        text.push_str(&format!(
            "        {} -- {}\n",
            filter.name(),
            filter.description().to_lowercase()
        ));
    }

    text.push_str(
        "save-image PATH-TO-IMAGE-FILE [LAYER-NAME] -- saves the flattened image, or the image up to the given layer\n\
         quit -- quits the program\n\
         help -- displays this dialog",
    );
    text
}
