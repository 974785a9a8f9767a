// flora_admin/src/web/payload.rs

//! `ProductPayload`: a request-body extractor accepting either a JSON document
//! or a urlencoded form, producing the raw JSON object the schema validator
//! expects.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::AppError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Untrusted product input plus the form's `intent`, if one was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
  pub input: Value,
  pub intent: Option<String>,
}

impl ProductPayload {
  /// Gathers form pairs into a JSON object.
  ///
  /// - a `json` field holding a JSON document replaces all other fields;
  /// - repeated `images` fields form the ordered image list (empty values are skipped);
  /// - `intent` is kept aside;
  /// - any other field becomes a string value (the last occurrence wins).
  pub fn from_form(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
    let mut fields = Map::new();
    let mut images: Option<Vec<Value>> = None;
    let mut embedded_json: Option<String> = None;
    let mut intent = None;

    for (key, value) in pairs {
      match key.as_str() {
        "json" => embedded_json = Some(value),
        "intent" => intent = Some(value),
        "images" => {
          let list = images.get_or_insert_with(Vec::new);
          if !value.trim().is_empty() {
            list.push(Value::String(value));
          }
        }
        _ => {
          fields.insert(key, Value::String(value));
        }
      }
    }

    let input = match embedded_json {
      Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|e| {
        warn!(error = %e, "Form carried an unparsable 'json' field.");
        AppError::BadRequest(format!("Invalid JSON in 'json' field: {}", e))
      })?,
      _ => {
        if let Some(images) = images {
          fields.insert("images".to_string(), Value::Array(images));
        }
        Value::Object(fields)
      }
    };

    Ok(Self { input, intent })
  }

  pub fn is_delete_intent(&self) -> bool {
    self.intent.as_deref() == Some("delete")
  }
}

impl FromRequest for ProductPayload {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
    if req.content_type().eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
      let form = web::Form::<Vec<(String, String)>>::from_request(req, payload);
      Box::pin(async move {
        let form = form
          .await
          .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e)))?;
        ProductPayload::from_form(form.into_inner())
      })
    } else {
      let json = web::Json::<Value>::from_request(req, payload);
      Box::pin(async move {
        let body = json
          .await
          .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        Ok(ProductPayload {
          input: body.into_inner(),
          intent: None,
        })
      })
    }
  }
}
