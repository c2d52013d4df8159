//! Print the OpenAPI document as pretty JSON on stdout.

use backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
