use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

/// What the fake provider saw for one `/games` call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub sport: String,
    pub query: HashMap<String, String>,
    pub api_key: Option<String>,
    pub host: Option<String>,
}

struct StubState {
    status: u16,
    body: Value,
    requests: Vec<RecordedRequest>,
}

/// Stands in for the upstream sports API. Serves `/{sport}/games` with
/// whatever response was configured last.
#[derive(Clone)]
pub struct ProviderStub {
    pub address: String,
    state: Arc<Mutex<StubState>>,
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn games(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    req: HttpRequest,
    state: web::Data<Mutex<StubState>>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        sport: path.into_inner(),
        query: query.into_inner(),
        api_key: header(&req, "x-rapidapi-key"),
        host: header(&req, "x-rapidapi-host"),
    });

    let status = actix_web::http::StatusCode::from_u16(state.status).unwrap();
    HttpResponse::build(status).json(state.body.clone())
}

impl ProviderStub {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let state = Arc::new(Mutex::new(StubState {
            status: 200,
            body: json!({ "errors": [], "results": 0, "response": [] }),
            requests: Vec::new(),
        }));
        let data = web::Data::from(state.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/{sport}/games", web::get().to(games))
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to bind provider stub")
        .run();
        let _ = tokio::spawn(server);

        Self {
            address: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn base_url(&self, sport: &str) -> String {
        format!("{}/{}", self.address, sport)
    }

    /// Respond to the next calls with these games.
    pub fn respond_with_games(&self, games: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        state.status = 200;
        state.body = json!({ "errors": [], "results": games.len(), "response": games });
    }

    pub fn respond_with(&self, status: u16, body: Value) {
        let mut state = self.state.lock().unwrap();
        state.status = status;
        state.body = body;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// A provider game in the shape the hockey endpoint usually returns.
pub fn provider_game(home: &str, away: &str, home_total: i64, away_total: i64, date: &str) -> Value {
    json!({
        "id": 1,
        "date": date,
        "time": "19:00",
        "status": { "long": "Game Finished", "short": "FT" },
        "teams": {
            "home": { "id": 1, "name": home },
            "away": { "id": 2, "name": away }
        },
        "scores": { "home": home_total, "away": away_total }
    })
}
