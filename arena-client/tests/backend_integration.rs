//! Integration tests for the capability probe and the transport facade.
//!
//! Uses wiremock as a stand-in for the feature backends.

mod common;

use std::time::Duration;

use arena_client::{
    CapabilityProbe, ClientConfig, ClientError, ImageUpload, SketchUpload, Transport,
};
use arena_core::{
    Action, BackendMode, BoundingBox, DetectionResult, EditAction, EditRequest, EditResponse,
    GanRequest, GeneratedImage, ImagePayload, SketchParams,
};
use common::{config_for, fast_probe, unreachable_url, PNG_MAGIC};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ==========================================================================
// Capability probe
// ==========================================================================

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn probe_ok_selects_remote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::connect(&config_for(&server))
        .await
        .expect("transport");
    assert_eq!(transport.mode(), BackendMode::Remote);
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn probe_error_status_selects_simulated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slots"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let probe = CapabilityProbe::new(&config, config.http_client().expect("http"))
        .expect("probe");
    assert_eq!(probe.detect().await, BackendMode::Simulated);
}

#[tokio::test]
async fn probe_unreachable_selects_simulated() {
    let config = ClientConfig::new(unreachable_url()).expect("config");
    let transport = Transport::connect(&config).await.expect("transport");
    assert_eq!(transport.mode(), BackendMode::Simulated);
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn probe_timeout_selects_simulated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slots"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = fast_probe(config_for(&server));
    let started = std::time::Instant::now();
    let transport = Transport::connect(&config).await.expect("transport");

    assert_eq!(transport.mode(), BackendMode::Simulated);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn probe_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slots"))
        .and(header_regex("user-agent", "^vision-arena/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::connect(&config_for(&server))
        .await
        .expect("transport");
    assert!(transport.mode().is_remote());
}

// ==========================================================================
// Remote pass-through
// ==========================================================================

fn remote(server: &MockServer) -> Transport {
    Transport::new(BackendMode::Remote, &config_for(server)).expect("transport")
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn detect_uploads_multipart_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/detect_objects"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("filename=\"street.png\""))
        .and(body_string_contains("image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bboxes": [{"bbox": [4, 8, 40, 80], "label": "person", "score": 0.87}],
            "annotated_image": "QUJD"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = remote(&server)
        .detect_objects(&ImageUpload::new(PNG_MAGIC.to_vec(), "street.png"))
        .await
        .expect("reply");
    assert!(reply.ok());
    assert!(!reply.is_simulated());

    let result: DetectionResult = reply.json().await.expect("body");
    assert_eq!(result.bboxes.len(), 1);
    assert_eq!(result.bboxes[0].label, "person");
    assert_eq!(result.annotated_image.as_str(), "QUJD");
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn edit_posts_json_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/object_edit"))
        .and(body_json(json!({
            "image": "QUJD",
            "actions": [
                {"bbox": [4, 8, 40, 80], "action": "remove"},
                {"bbox": [1, 1, 2, 2], "action": "keep"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"edited_image": "REVG"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = EditRequest {
        image: ImagePayload::new("QUJD"),
        actions: vec![
            EditAction {
                bbox: BoundingBox::from_pixels([4, 8, 40, 80]),
                action: Action::Remove,
            },
            EditAction {
                bbox: BoundingBox::from_pixels([1, 1, 2, 2]),
                action: Action::Keep,
            },
        ],
    };
    let body: EditResponse = remote(&server)
        .object_edit(&request)
        .await
        .expect("reply")
        .json()
        .await
        .expect("body");
    assert_eq!(body.edited_image.as_str(), "REVG");
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn sketch_sends_image_and_text_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sketch_to_image"))
        .and(body_string_contains("filename=\"sketch.png\""))
        .and(body_string_contains("name=\"guidance_scale\""))
        .and(body_string_contains("7.5"))
        .and(body_string_contains("name=\"num_steps\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"generated_image": "R0VO"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let upload = SketchUpload::new(
        PNG_MAGIC.to_vec(),
        SketchParams {
            guidance_scale: "7.5".to_string(),
            num_steps: "20".to_string(),
        },
    );
    let body: GeneratedImage = remote(&server)
        .sketch_to_image(&upload)
        .await
        .expect("reply")
        .json()
        .await
        .expect("body");
    assert_eq!(body.generated_image.as_str(), "R0VO");
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn gan_posts_latent_and_noise() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gan_generate"))
        .and(body_json(json!({"latent_dim": 64, "noise_scale": 0.5})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"generated_image": "R0FO"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = GanRequest {
        latent_dim: 64,
        noise_scale: 0.5,
    };
    let reply = remote(&server).gan_generate(&request).await.expect("reply");
    assert!(reply.ok());
    let body: GeneratedImage = reply.json().await.expect("body");
    assert_eq!(body.generated_image.as_str(), "R0FO");
}

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn non_ok_status_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/gan_generate"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "busy"})))
        .mount(&server)
        .await;

    let reply = remote(&server)
        .gan_generate(&GanRequest::default())
        .await
        .expect("reply");
    assert!(!reply.ok());
    assert_eq!(reply.status(), 503);
}

#[tokio::test]
async fn remote_connection_failure_is_http_error() {
    let config = ClientConfig::new(unreachable_url()).expect("config");
    let transport = Transport::new(BackendMode::Remote, &config).expect("transport");

    let result = transport.gan_generate(&GanRequest::default()).await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}

// ==========================================================================
// Simulated mode never touches the network
// ==========================================================================

#[tokio::test]
#[cfg_attr(
    target_os = "macos",
    ignore = "wiremock/reqwest system-configuration issue on macOS"
)]
async fn simulated_mode_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let transport =
        Transport::new(BackendMode::Simulated, &config_for(&server)).expect("transport");

    let detect = transport
        .detect_objects(&ImageUpload::new(PNG_MAGIC.to_vec(), "a.png"))
        .await
        .expect("detect");
    assert!(detect.is_simulated());

    let sketch = transport
        .sketch_to_image(&SketchUpload::new(PNG_MAGIC.to_vec(), SketchParams::default()))
        .await
        .expect("sketch");
    let body: GeneratedImage = sketch.json().await.expect("body");
    assert!(!body.generated_image.is_empty());

    let gan = transport
        .gan_generate(&GanRequest::default())
        .await
        .expect("gan");
    assert!(gan.ok());
}
