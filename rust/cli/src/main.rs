use clap::Parser;
use itemapi::api::{self, Handler, HttpResponse, RawRequest, ValidationContext};
use itemapi::errors::ProjectError;
use itemapi::response::error_response;
use std::error::Error;
use std::io::Read;
use std::process::ExitCode;

mod args;

use args::{Cli, Command};

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = context(&cli);

    let response = match build_request(&cli, &ctx) {
        Ok((handler, request)) => {
            log::debug!("Dispatching {:?}", cli.command);
            handler(&request, &ctx)
        }
        Err(err) => {
            log::warn!("Request could not be assembled ({}): {}", err.code(), err);
            error_response(&err)
        }
    };

    print_response(&response, cli.pretty)?;
    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Flags win over `ITEMAPI_*` variables; clap resolves both.
fn context(cli: &Cli) -> ValidationContext {
    let defaults = ValidationContext::default();
    ValidationContext {
        max_body_bytes: cli.max_body_bytes.unwrap_or(defaults.max_body_bytes),
        strict_mode: cli.strict,
    }
}

fn build_request(cli: &Cli, ctx: &ValidationContext) -> Result<(Handler, RawRequest), ProjectError> {
    let mut request = RawRequest::new();
    if let Some(query) = &cli.query {
        request = request.with_query(query);
    }

    let handler: Handler = match &cli.command {
        Command::Root { name } => {
            request = with_optional(request, "name", name);
            api::read_root
        }
        Command::Model { model_name } => {
            request = request.with_path_param("model_name", model_name.as_str());
            api::get_model
        }
        Command::Item { item_id, q } => {
            request = with_optional(request.with_path_param("item_id", item_id.as_str()), "q", q);
            api::read_item
        }
        Command::CreateItem { body, body_file } => {
            let bytes = read_body(body.as_deref(), body_file.as_deref())?;
            request = request.with_body_bytes(&bytes, ctx)?;
            api::create_item
        }
        Command::Items { skip, limit } => {
            request = with_optional(with_optional(request, "skip", skip), "limit", limit);
            api::list_items
        }
        Command::Sum { a, b } => {
            request = with_optional(with_optional(request, "a", a), "b", b);
            api::add_numbers
        }
    };

    Ok((handler, request))
}

fn with_optional(request: RawRequest, name: &str, value: &Option<String>) -> RawRequest {
    match value {
        Some(value) => request.with_query_param(name, value.as_str()),
        None => request,
    }
}

fn read_body(inline: Option<&str>, file: Option<&std::path::Path>) -> Result<Vec<u8>, ProjectError> {
    let io_error = |e: std::io::Error| ProjectError::System {
        code: "ITEMAPI_SYSTEM_BODY_READ".to_string(),
        message: format!("Could not read request body: {}", e),
    };

    match (inline, file) {
        (Some(body), _) => Ok(body.as_bytes().to_vec()),
        (None, Some(path)) => std::fs::read(path).map_err(io_error),
        (None, None) => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).map_err(io_error)?;
            Ok(buf)
        }
    }
}

fn print_response(response: &HttpResponse, pretty: bool) -> Result<(), Box<dyn Error>> {
    let body = response.json().cloned().unwrap_or(serde_json::Value::Null);
    let text = if pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    eprintln!("HTTP {}", response.status_code);
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    fn run(argv: &[&str]) -> HttpResponse {
        let cli = Cli::try_parse_from(argv).unwrap();
        let ctx = context(&cli);
        match build_request(&cli, &ctx) {
            Ok((handler, request)) => handler(&request, &ctx),
            Err(err) => error_response(&err),
        }
    }

    #[test]
    fn test_root_command() {
        let response = run(&["itemapi", "root", "--name", "Carlos"]);
        assert_eq!(
            response.json().unwrap(),
            &json!({"mensaje": "Hola Carlos. Atte: Christos"})
        );
    }

    #[test]
    fn test_item_command_validates_bounds() {
        let ok = run(&["itemapi", "item", "1000", "--q", "x"]);
        assert_eq!(ok.json().unwrap(), &json!({"item_id": 1000}));

        let rejected = run(&["itemapi", "item", "1001", "--q", "x"]);
        assert_eq!(rejected.status_code, 422);
    }

    #[test]
    fn test_create_item_inline_body() {
        let response = run(&[
            "itemapi",
            "create-item",
            "--body",
            r#"{"name": "Foo", "price": 10, "tax": 2}"#,
        ]);
        assert_eq!(response.status_code, 201);
        assert_eq!(response.json().unwrap()["total"], 12.0);
    }

    #[test]
    fn test_create_item_bad_json_is_400() {
        let response = run(&["itemapi", "create-item", "--body", "{nope"]);
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_global_query_merges_and_strict_rejects_extras() {
        let lenient = run(&["itemapi", "items", "--query", "limit=1&color=red"]);
        assert_eq!(lenient.json().unwrap(), &json!([{"item_name": "Foo"}]));

        let strict = run(&["itemapi", "items", "--strict", "--query", "color=red"]);
        assert_eq!(strict.status_code, 422);
    }

    #[test]
    fn test_sum_command() {
        let response = run(&["itemapi", "sum", "--a", "1", "--b", "2"]);
        assert_eq!(response.json().unwrap()["sum"], 3);
    }

    #[test]
    fn test_context_from_flags() {
        let cli =
            Cli::try_parse_from(["itemapi", "--max-body-bytes", "16", "--strict", "items"]).unwrap();
        assert_eq!(
            context(&cli),
            ValidationContext {
                max_body_bytes: 16,
                strict_mode: true
            }
        );

        let oversized = run(&[
            "itemapi",
            "--max-body-bytes",
            "8",
            "create-item",
            "--body",
            r#"{"name": "Foo", "price": 10}"#,
        ]);
        assert_eq!(oversized.status_code, 400);
    }

    #[test]
    fn test_config_flags_bound_to_env() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("strict").as_deref(), Some("ITEMAPI_STRICT"));
        assert_eq!(env_of("max_body_bytes").as_deref(), Some("ITEMAPI_MAX_BODY_BYTES"));
    }

    #[test]
    fn test_config_flags_reject_bad_values() {
        assert!(Cli::try_parse_from(["itemapi", "--strict=sometimes", "items"]).is_err());
        assert!(Cli::try_parse_from(["itemapi", "--max-body-bytes", "ten", "items"]).is_err());
    }

    #[test]
    fn test_body_and_body_file_conflict() {
        let result = Cli::try_parse_from([
            "itemapi",
            "create-item",
            "--body",
            "{}",
            "--body-file",
            "item.json",
        ]);
        assert!(result.is_err());
    }
}
