use clap::{Args, Parser, Subcommand};
use docket::{
    DocumentPipeline, JsonFileTemplateRepository, PipelineBuilder, PipelineError, RenderRequest,
    Template, TemplateStore, record_for,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "docket")]
#[command(version, about = "Render field-mapped templates from JSON data into PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the templates in a store
    List {
        /// Template store (a JSON array of templates)
        #[arg(long, value_name = "FILE")]
        store: PathBuf,
    },
    /// Render a stored template
    Render {
        #[arg(long, value_name = "FILE")]
        store: PathBuf,

        /// Id of the template to render
        #[arg(long)]
        template: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render a single template file without a store
    RenderFile {
        #[arg(long, value_name = "FILE")]
        template_file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Data record to render against
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Layout configuration overriding the A4 defaults
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Directory the PDF is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    log::debug!("Loading {}", path.display());
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

impl OutputArgs {
    fn record(&self) -> Result<Option<Value>, PipelineError> {
        self.data.as_deref().map(read_json::<Value>).transpose()
    }

    fn pipeline(&self) -> Result<DocumentPipeline, PipelineError> {
        let builder = PipelineBuilder::new();
        match &self.layout {
            Some(path) => builder.with_layout_file(path)?.build(),
            None => builder.build(),
        }
    }

    fn write(&self, template: &Template, data: &Value) -> Result<(), PipelineError> {
        let path = self.pipeline()?.generate_into_dir(template, data, &self.out_dir)?;
        println!("{}", path.display());
        Ok(())
    }
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List { store } => {
            let store = TemplateStore::open(JsonFileTemplateRepository::new(store))?;
            if store.templates().is_empty() {
                println!("No templates saved yet.");
            }
            for template in store.templates() {
                println!("{}\t{}", template.id, template.summary());
            }
        }
        Command::Render {
            store,
            template,
            output,
        } => {
            let store = TemplateStore::open(JsonFileTemplateRepository::new(store))?;
            let request = RenderRequest {
                template_id: Some(template.into()),
                record: output.record()?,
            };
            let validated = request.validate(store.templates())?;
            output.write(validated.template, &validated.data)?;
        }
        Command::RenderFile {
            template_file,
            output,
        } => {
            let template: Template = read_json(&template_file)?;
            let data = record_for(&template, output.record()?)?;
            output.write(&template, &data)?;
        }
    }
    Ok(())
}
