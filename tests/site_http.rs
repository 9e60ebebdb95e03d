//! Public site over real HTTP: aggregation, degradation, the contact form,
//! and the link redirects.

mod support;

use folio::notify::TelegramNotifier;
use folio::site::HomeView;
use folio::store::{RestStore, Store};
use support::{scratch_dir, seeded_store, spawn_fake_telegram, spawn_site, SiteOptions};

#[tokio::test]
async fn home_aggregates_every_section() {
    let base = spawn_site(seeded_store(), SiteOptions::default()).await;
    let client = reqwest::Client::new();

    let view: HomeView =
        client.get(format!("{base}/")).send().await.unwrap().json().await.unwrap();

    assert_eq!(view.name, "Test Owner");
    assert_eq!(view.bio, "Cloud engineer and builder.");
    assert_eq!(view.about_bio, "I build cloud things.");
    assert_eq!(view.about_heading, "Who I am");
    assert_eq!(view.skills, vec!["AWS".to_string(), "Docker".to_string()]);
    assert_eq!(view.typed_items, "AWS, Docker");
    assert_eq!(view.professional_summary, "Seasoned engineer.");
    assert_eq!(view.about_skills.len(), 1);
    assert_eq!(view.about_skills[0].skill, "Terraform");
    assert_eq!(view.technical_skills.len(), 1);
    assert_eq!(view.technical_skills[0].name, "Databases");
    assert_eq!(view.experiences.len(), 1);
    assert_eq!(view.education.len(), 1);
    assert_eq!(view.certifications.len(), 1);
    assert_eq!(view.projects.len(), 1);
    assert_eq!(view.email, "owner@example.com");
    assert_eq!(view.github, "github.com/owner");
}

#[tokio::test]
async fn home_degrades_to_defaults_when_the_store_is_down() {
    // Nothing listens on port 1; every section read fails.
    let base = spawn_site(RestStore::new("http://127.0.0.1:1"), SiteOptions::default()).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(response.status(), 200, "the page renders even with the store down");

    let view: HomeView = response.json().await.unwrap();
    assert_eq!(view.name, "Test Owner");
    assert_eq!(view.bio, "");
    assert!(view.skills.is_empty());
    // The typing animation falls back to the configured tagline.
    assert_eq!(view.typed_items, "Builder of test fixtures");
    assert!(view.experiences.is_empty());
    assert_eq!(view.email, "");
}

#[tokio::test]
async fn contact_form_notifies_and_always_says_ok() {
    let (telegram_base, sent) = spawn_fake_telegram().await;
    let notifier = TelegramNotifier::new("test-token", "4242").with_api_base(&telegram_base);
    let base = spawn_site(
        seeded_store(),
        SiteOptions { notifier: Some(notifier), ..SiteOptions::default() },
    )
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/contact"))
        .form(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("subject", "Hello"),
            ("message", "Nice site"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");

    let messages = sent.0.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "4242");
    assert!(messages[0].1.contains("Name: Ada"));
    assert!(messages[0].1.contains("Message: Nice site"));
}

#[tokio::test]
async fn contact_form_swallows_notifier_failures() {
    let notifier = TelegramNotifier::new("test-token", "4242").with_api_base("http://127.0.0.1:1");
    let base = spawn_site(
        seeded_store(),
        SiteOptions { notifier: Some(notifier), ..SiteOptions::default() },
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("{base}/contact"))
        .form(&[("name", "Ada"), ("email", "a@b.c"), ("subject", "s"), ("message", "m")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn link_redirects_normalize_stored_values() {
    let base = spawn_site(seeded_store(), SiteOptions::default()).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client.get(format!("{base}/github")).send().await.unwrap();
    assert_eq!(response.status(), 307);
    assert_eq!(response.headers()["location"], "https://github.com/owner");

    let response = client.get(format!("{base}/linkedin")).send().await.unwrap();
    assert_eq!(response.headers()["location"], "https://linkedin.com/in/owner");
}

#[tokio::test]
async fn link_redirects_fall_back_when_the_store_is_down() {
    let base = spawn_site(RestStore::new("http://127.0.0.1:1"), SiteOptions::default()).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client.get(format!("{base}/github")).send().await.unwrap();
    assert_eq!(response.headers()["location"], "https://github.com");
}

#[tokio::test]
async fn edit_redirects_to_the_admin_login() {
    let base = spawn_site(seeded_store(), SiteOptions::default()).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client.get(format!("{base}/edit")).send().await.unwrap();
    assert_eq!(response.status(), 307);
    assert_eq!(response.headers()["location"], "http://127.0.0.1:8081/admin-login");
}

#[tokio::test]
async fn download_resume_serves_the_recorded_file() {
    let store = seeded_store();
    let resume_dir = scratch_dir().join("resume");
    tokio::fs::create_dir_all(&resume_dir).await.unwrap();
    tokio::fs::write(resume_dir.join("Resume.txt"), b"plain resume").await.unwrap();
    store
        .create(
            &folio::NodePath::new("about/resume"),
            serde_json::json!({"filename": "Resume.txt", "file_type": "TXT"}),
        )
        .await
        .unwrap();

    let base = spawn_site(store, SiteOptions { notifier: None, resume_dir }).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/download_resume")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/plain");
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("Resume.txt"));
    assert_eq!(response.text().await.unwrap(), "plain resume");
}

#[tokio::test]
async fn download_resume_without_a_file_is_not_found() {
    let base = spawn_site(seeded_store(), SiteOptions::default()).await;
    let response =
        reqwest::Client::new().get(format!("{base}/download_resume")).send().await.unwrap();
    assert_eq!(response.status(), 404);
}
