//! Health demo endpoints: BMI calculation plus tool discovery.
//!
//! Unrelated to the content pipeline; kept as a self-contained demo of
//! exposing one computation over HTTP and registering it for discovery by
//! external agent frameworks.

use axum::{extract::Query, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Operation id external agent frameworks invoke the calculation by.
pub const BMI_OPERATION_ID: &str = "calculate_bmi";

#[derive(Debug, Deserialize)]
pub struct BmiParams {
    pub weight_kg: f64,
    pub height_m: f64,
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    /// Body-mass index rounded to 2 decimal places.
    pub bmi: f64,
    /// WHO assessment band.
    pub assessment: String,
}

/// Calculate BMI and return a WHO assessment.
pub async fn calculate_bmi(
    Query(params): Query<BmiParams>,
) -> Result<Json<BmiResponse>, (StatusCode, String)> {
    if !(params.weight_kg > 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            "weight_kg must be a positive number".to_string(),
        ));
    }
    if !(params.height_m > 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            "height_m must be a positive number".to_string(),
        ));
    }

    let bmi = round2(params.weight_kg / (params.height_m * params.height_m));
    Ok(Json(BmiResponse {
        bmi,
        assessment: assessment(bmi).to_string(),
    }))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// WHO band for a rounded BMI value.
fn assessment(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi <= 24.9 {
        "Normal weight"
    } else if bmi <= 29.9 {
        "Overweight"
    } else {
        "Obesity"
    }
}

/// A discoverable tool backed by an endpoint of this service.
#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's parameters.
    pub parameters: serde_json::Value,
}

/// List the tools this service exposes, so external agent frameworks can
/// invoke them by name.
pub async fn list_tools() -> Json<Vec<ToolInfo>> {
    Json(vec![ToolInfo {
        name: BMI_OPERATION_ID.to_string(),
        description: "Calculate BMI & return a WHO assessment".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "weight_kg": {
                    "type": "number",
                    "exclusiveMinimum": 0,
                    "description": "Body weight in kilograms"
                },
                "height_m": {
                    "type": "number",
                    "exclusiveMinimum": 0,
                    "description": "Height in metres"
                }
            },
            "required": ["weight_kg", "height_m"]
        }),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn bmi(weight_kg: f64, height_m: f64) -> Result<BmiResponse, StatusCode> {
        calculate_bmi(Query(BmiParams {
            weight_kg,
            height_m,
        }))
        .await
        .map(|Json(response)| response)
        .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn normal_weight_example() {
        let response = bmi(70.5, 1.75).await.unwrap();
        assert_eq!(response.bmi, 23.02);
        assert_eq!(response.assessment, "Normal weight");
    }

    #[tokio::test]
    async fn underweight_example() {
        let response = bmi(50.0, 1.8).await.unwrap();
        assert_eq!(response.bmi, 15.43);
        assert_eq!(response.assessment, "Underweight");
    }

    #[tokio::test]
    async fn band_edges() {
        assert_eq!(assessment(18.49), "Underweight");
        assert_eq!(assessment(18.5), "Normal weight");
        assert_eq!(assessment(24.9), "Normal weight");
        assert_eq!(assessment(24.91), "Overweight");
        assert_eq!(assessment(29.9), "Overweight");
        assert_eq!(assessment(29.91), "Obesity");
    }

    #[tokio::test]
    async fn non_positive_inputs_are_rejected() {
        assert_eq!(bmi(0.0, 1.75).await.unwrap_err(), StatusCode::BAD_REQUEST);
        assert_eq!(bmi(-70.0, 1.75).await.unwrap_err(), StatusCode::BAD_REQUEST);
        assert_eq!(bmi(70.0, 0.0).await.unwrap_err(), StatusCode::BAD_REQUEST);
        assert_eq!(
            bmi(70.0, f64::NAN).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn tool_listing_names_the_operation() {
        let Json(tools) = list_tools().await;
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, BMI_OPERATION_ID);
        assert_eq!(tools[0].parameters["required"][0], "weight_kg");
    }
}
