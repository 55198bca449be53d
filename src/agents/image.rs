//! Image agent: header-image generation.

use crate::agents::types::{ImageRequest, ImageResult};
use crate::agents::{Message, SIMULATION_LABEL};
use crate::config::{Capability, PipelineConfig};
use crate::llm::{ImageOptions, LlmClient, LlmError};
use crate::simulation;

/// Generate an image for a request.
///
/// In real mode the configured image model receives a style-enhanced prompt;
/// any failure falls back to the deterministic placeholder image derived from
/// the request keywords. Never fails.
pub async fn process(
    config: &PipelineConfig,
    client: &dyn LlmClient,
    request: &ImageRequest,
) -> Message<ImageResult> {
    let settings = config.get(Capability::Image);
    tracing::info!(
        style = request.style(),
        model = %settings.model_info(),
        "image agent generating image"
    );

    if !settings.simulation_mode {
        match call_model(config, client, request).await {
            Ok(result) => {
                tracing::info!(url = %result.image_url, model = %result.model_used, "image generated");
                let label = result.model_used.clone();
                return Message::new(result, "application/json", label);
            }
            Err(err) => {
                tracing::warn!("image model call failed ({err}), falling back to simulation");
            }
        }
    }

    let result = simulation::simulation_image(request);
    tracing::info!(url = %result.image_url, model = SIMULATION_LABEL, "image generated");
    Message::new(result, "application/json", SIMULATION_LABEL)
}

async fn call_model(
    config: &PipelineConfig,
    client: &dyn LlmClient,
    request: &ImageRequest,
) -> Result<ImageResult, LlmError> {
    let settings = config.get(Capability::Image);
    let prompt = enhance_prompt(request);

    let options = ImageOptions {
        size: Some(request.size().as_str().to_string()),
        quality: Some(request.quality().as_str().to_string()),
    };
    let image = client.generate_image(&settings.model, &prompt, options).await?;

    Ok(ImageResult {
        image_url: image.url,
        alt_text: format!("AI-generated illustration: {}", request.prompt()),
        prompt_used: prompt,
        style_used: request.style().to_string(),
        dimensions: request.size().as_str().to_string(),
        format: "PNG".to_string(),
        generation_method: "OpenAI DALL-E".to_string(),
        model_used: settings.model.clone(),
    })
}

/// Prepend the style preamble and append the fixed quality requirements.
fn enhance_prompt(request: &ImageRequest) -> String {
    let style_prompt = match request.style() {
        "modern" => "Create a modern, sleek image with contemporary design elements.",
        "artistic" => "Create an artistic, creative image with unique visual elements.",
        "minimalist" => "Create a clean, minimalist image with essential elements only.",
        _ => "Create a professional, high-quality image suitable for business use.",
    };

    format!(
        "{style_prompt}\n\n\
         {}\n\n\
         Ensure the image is:\n\
         - High quality and well-composed\n\
         - Appropriate for professional use\n\
         - Clear and visually appealing\n\
         - Consistent with requested style ({})",
        request.prompt(),
        request.style()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImageQuality, ImageSize};

    fn request(style: &str) -> ImageRequest {
        ImageRequest::new(
            "An illustration of collaborative robots",
            style,
            ImageSize::Square,
            ImageQuality::Standard,
            vec!["robots".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn enhance_prompt_selects_style_preamble() {
        assert!(enhance_prompt(&request("minimalist")).starts_with("Create a clean, minimalist"));
        assert!(enhance_prompt(&request("modern")).starts_with("Create a modern, sleek"));
        // Unknown styles get the professional preamble.
        assert!(enhance_prompt(&request("vaporwave")).starts_with("Create a professional"));
    }

    #[test]
    fn enhance_prompt_keeps_original_prompt() {
        let enhanced = enhance_prompt(&request("professional"));
        assert!(enhanced.contains("An illustration of collaborative robots"));
        assert!(enhanced.contains("Consistent with requested style (professional)"));
    }
}
