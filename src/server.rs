use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use actix_cors::Cors;
use serde::Deserialize;
use std::path::PathBuf;
use uuid::Uuid;

use job_scraper_lib::{logger, sink, Pipeline, PipelineConfig, Query, ScrapeError, SiteClient};

#[derive(Deserialize)]
struct JobsRequest {
    term: String,
}

#[get("/api/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json("Server is running")
}

#[get("/api/jobs")]
async fn download_jobs(params: web::Query<JobsRequest>) -> impl Responder {
    let term = params.term.trim().to_string();
    if term.is_empty() {
        return HttpResponse::BadRequest().json("Missing search term");
    }

    // The blocking HTTP client must not run on the async executor.
    let result = web::block(move || {
        let query = Query::new(&term);
        let pipeline = Pipeline::new(SiteClient::new(), PipelineConfig::default());
        let jobs = pipeline.run(&query)?;

        let mut output_path = PathBuf::from("outputs");
        std::fs::create_dir_all(&output_path)?;
        output_path.push(format!("jobs_{}.csv", Uuid::new_v4()));

        sink::write_records(&jobs, &output_path)?;
        let content = std::fs::read_to_string(&output_path)?;
        // Transient artifact: the download response is the only copy.
        let _ = std::fs::remove_file(&output_path);

        Ok::<_, ScrapeError>((jobs.len(), content))
    })
    .await;

    match result {
        Ok(Ok((count, content))) => {
            log::info!("Scrape finished, {} records", count);
            HttpResponse::Ok()
                .content_type("text/csv")
                .append_header((
                    "Content-Disposition",
                    "attachment; filename=\"jobs.csv\"",
                ))
                .body(content)
        }
        Ok(Err(e)) => {
            log::error!("Scrape failed: {}", e);
            HttpResponse::BadGateway().json(serde_json::json!({
                "status": "error",
                "message": e.to_string(),
            }))
        }
        Err(e) => {
            log::error!("Scrape worker error: {}", e);
            HttpResponse::InternalServerError().json("Scrape worker failed")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    logger::init();

    log::info!("Starting Web Server at http://0.0.0.0:8080");

    HttpServer::new(|| {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .service(health_check)
            .service(download_jobs)
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
