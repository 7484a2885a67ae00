use httpmock::Mock;
use stories::{
  contact::{Attachment, ContactForm, ContactRelay, Submission, MAX_WORDS},
  Config,
};

use super::*;

async fn relay_answering(server: &MockServer, status: u16) -> (Mock<'_>, ContactRelay) {
  let mock = server
    .mock_async(|when, then| {
      when.method(POST).path("/f/test").header_exists("content-type");
      then.status(status).header("content-type", "application/json").body("{}");
    })
    .await;
  (mock, ContactRelay::new(server.url("/f/test")).unwrap())
}

#[traced_test]
#[tokio::test]
async fn test_submission_sent() {
  let server = MockServer::start_async().await;
  let (mock, relay) = relay_answering(&server, 200).await;
  let form = ContactForm::new("Ana", "ana@example.com", "Loved the piece on reading rooms.");

  let submission = relay.submit(&form).await;
  assert_eq!(submission, Submission::Sent);
  assert!(submission.is_sent());
  assert_eq!(submission.status_message(), "");
  assert_eq!(mock.hits_async().await, 1);
}

#[traced_test]
#[tokio::test]
async fn test_submission_rejected() {
  let server = MockServer::start_async().await;
  let (_mock, relay) = relay_answering(&server, 422).await;
  let submission = relay.submit(&ContactForm::new("Ana", "not-an-email", "hi")).await;

  assert_eq!(submission, Submission::Rejected(422));
  assert_eq!(submission.status_message(), "Something went wrong. Please try again later.");
  assert!(logs_contain("Contact form rejected by relay"));
}

#[traced_test]
#[tokio::test]
async fn test_submission_with_pdf_attachment() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("essay.pdf");
  std::fs::write(&path, b"%PDF-1.4\n%%EOF\n")?;

  let server = MockServer::start_async().await;
  let (mock, relay) = relay_answering(&server, 200).await;
  let form = ContactForm::new("Teo", "teo@example.com", "Attached, as promised.")
    .with_attachment(Attachment::from_path(&path)?);

  assert_eq!(relay.submit(&form).await, Submission::Sent);
  assert_eq!(mock.hits_async().await, 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_missing_attachment_file_is_a_network_error() -> TestResult<()> {
  let dir = tempdir()?;
  let server = MockServer::start_async().await;
  let (mock, relay) = relay_answering(&server, 200).await;
  let form = ContactForm::new("Teo", "teo@example.com", "hi")
    .with_attachment(Attachment::from_path(dir.path().join("gone.pdf"))?);

  assert_eq!(relay.submit(&form).await, Submission::NetworkError);
  assert_eq!(mock.hits_async().await, 0);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_unconfigured_relay_sends_nothing() {
  let config = Config::default().with_form_endpoint(None);
  let relay = ContactRelay::from_config(&config).unwrap();

  assert!(!relay.is_configured());
  let submission = relay.submit(&ContactForm::new("Ana", "ana@example.com", "hi")).await;
  assert_eq!(submission, Submission::EndpointMissing);
}

#[test]
fn test_long_comments_are_cut_before_sending() {
  let comments = "word ".repeat(MAX_WORDS + 20);
  let form = ContactForm::new("Ana", "ana@example.com", &comments);
  assert_eq!(form.comments.split(' ').count(), MAX_WORDS);
}
