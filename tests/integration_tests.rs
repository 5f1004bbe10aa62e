use directory_etl::{CliConfig, DirectoryPipeline, LocalStorage, RunController};
use httpmock::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn directory_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a class="experts_link w-inline-block" href="{}">Cabinet</a>"#, l))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

fn profile_page(json_ld: &str) -> String {
    format!(
        r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
        json_ld
    )
}

fn config_for(server: &MockServer, output_path: &str, threshold: usize) -> CliConfig {
    CliConfig {
        listing_url_template: format!("{}/villes/ile-de-france?page={{page}}", server.base_url()),
        page_count: 2,
        base_url: server.base_url(),
        output_path: output_path.to_string(),
        rescrape_threshold: threshold,
        request_timeout: 5,
        ..CliConfig::default()
    }
}

async fn run(config: CliConfig) -> directory_etl::Result<directory_etl::domain::model::RunSummary> {
    let storage = LocalStorage::new(config.output_path.clone());
    let threshold = config.rescrape_threshold;
    let pipeline = DirectoryPipeline::new(storage, config)?;
    RunController::new(pipeline, threshold).run().await
}

#[tokio::test]
async fn test_end_to_end_run_then_threshold_reuse() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("result").to_str().unwrap().to_string();

    let server = MockServer::start();
    let page_one = server.mock(|when, then| {
        when.method(GET)
            .path("/villes/ile-de-france")
            .query_param("page", "1");
        then.status(200)
            .body(directory_page(&["/cabinet/acme", "/cabinet/no-ld"]));
    });
    let page_two = server.mock(|when, then| {
        when.method(GET)
            .path("/villes/ile-de-france")
            .query_param("page", "2");
        then.status(200).body(directory_page(&["/cabinet/beta"]));
    });
    let acme = server.mock(|when, then| {
        when.method(GET).path("/cabinet/acme");
        then.status(200).body(profile_page(
            r#"{"@type":"LocalBusiness","name":"Acme","telephone":"+33...","address":{"streetAddress":"1 Rue","addressLocality":"Paris","addressRegion":"IDF","postalCode":"75001","addressCountry":"FR"},"url":"https://acme.example"}"#,
        ));
    });
    let no_ld = server.mock(|when, then| {
        when.method(GET).path("/cabinet/no-ld");
        then.status(200).body("<html><body>No metadata here</body></html>");
    });
    let beta = server.mock(|when, then| {
        when.method(GET).path("/cabinet/beta");
        then.status(200).body(profile_page(
            r#"{"@type":"LocalBusiness","name":"Beta, SARL","telephone":"+33 2"}"#,
        ));
    });

    let summary = run(config_for(&server, &output_path, 2)).await.unwrap();

    assert!(!summary.reused_existing);
    assert_eq!(summary.listings_harvested, Some(3));
    assert_eq!(summary.records, 2);
    page_one.assert();
    page_two.assert();
    acme.assert();
    no_ld.assert();
    beta.assert();

    let out = Path::new(&output_path);
    let listings: serde_json::Value =
        serde_json::from_slice(&std::fs::read(out.join("listings.json")).unwrap()).unwrap();
    assert_eq!(
        listings,
        serde_json::json!([
            {"link": "/cabinet/acme"},
            {"link": "/cabinet/no-ld"},
            {"link": "/cabinet/beta"}
        ])
    );

    let scraped: serde_json::Value =
        serde_json::from_slice(&std::fs::read(out.join("scraped_listings.json")).unwrap())
            .unwrap();
    assert_eq!(scraped.as_array().unwrap().len(), 2);
    assert_eq!(scraped[0]["@type"], "LocalBusiness");
    assert_eq!(scraped[0]["address"]["postalCode"], "75001");

    let csv_path = out.join("scraped_listings.csv");
    let first_csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        first_csv,
        "Type,Name,Description,Telephone,Address,Image,URL\n\
         LocalBusiness,Acme,,+33...,1 Rue Paris IDF 75001 FR,,https://acme.example\n\
         LocalBusiness,\"Beta, SARL\",,+33 2,,,\n"
    );

    // Saved extraction now meets the threshold: no request, CSV rewritten.
    std::fs::remove_file(&csv_path).unwrap();
    let summary = run(config_for(&server, &output_path, 2)).await.unwrap();

    assert!(summary.reused_existing);
    assert_eq!(summary.records, 2);
    assert_eq!(page_one.hits(), 1);
    assert_eq!(page_two.hits(), 1);
    assert_eq!(acme.hits(), 1);
    assert_eq!(beta.hits(), 1);
    assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), first_csv);
}

#[tokio::test]
async fn test_short_saved_extraction_triggers_full_scrape() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(
        temp_dir.path().join("scraped_listings.json"),
        r#"[{"name":"Old","telephone":"0"}]"#,
    )
    .unwrap();

    let server = MockServer::start();
    let pages = server.mock(|when, then| {
        when.method(GET).path("/villes/ile-de-france");
        then.status(200).body(directory_page(&["/cabinet/new"]));
    });
    let profile = server.mock(|when, then| {
        when.method(GET).path("/cabinet/new");
        then.status(200)
            .body(profile_page(r#"{"name":"New","telephone":"1"}"#));
    });

    let summary = run(config_for(&server, &output_path, 42)).await.unwrap();

    assert!(!summary.reused_existing);
    assert_eq!(pages.hits(), 2);
    assert_eq!(profile.hits(), 2);
    // Both pages list the same profile and duplicates are kept.
    assert_eq!(summary.records, 2);

    let csv = std::fs::read_to_string(temp_dir.path().join("scraped_listings.csv")).unwrap();
    assert!(!csv.contains("Old"));
    assert_eq!(csv.matches(",New,").count(), 2);
}

#[tokio::test]
async fn test_malformed_saved_extraction_counts_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("scraped_listings.json"), "{not json").unwrap();

    let server = MockServer::start();
    let pages = server.mock(|when, then| {
        when.method(GET).path("/villes/ile-de-france");
        then.status(500);
    });

    let summary = run(config_for(&server, &output_path, 1)).await.unwrap();

    assert_eq!(pages.hits(), 2);
    assert_eq!(summary.listings_harvested, Some(0));
    assert_eq!(summary.records, 0);
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("scraped_listings.csv")).unwrap(),
        "Type,Name,Description,Telephone,Address,Image,URL\n"
    );
}
