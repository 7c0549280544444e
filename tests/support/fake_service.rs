use std::{
    io::{BufRead, BufReader, Read, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
};

/// A canned reply for one route.
#[derive(Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: String,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self {
            status: "200 OK",
            body: body.to_string(),
        }
    }

    pub fn status(status: &'static str, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A request the fake service received.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Loopback HTTP server answering `/model-info`, `/predict` and `/health`.
pub struct FakeService {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeService {
    pub fn start(model_info: Reply, predict: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    continue;
                };
                let recorded = recorded.clone();
                let model_info = model_info.clone();
                let predict = predict.clone();
                thread::spawn(move || serve(stream, &recorded, &model_info, &predict));
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
    }
}

fn serve(stream: TcpStream, recorded: &Mutex<Vec<Recorded>>, model_info: &Reply, predict: &Reply) {
    let Ok(mut writer) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() || line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    recorded
        .lock()
        .unwrap_or_else(|err| err.into_inner())
        .push(Recorded {
            method: method.clone(),
            path: path.clone(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    let reply = match (method.as_str(), path.as_str()) {
        ("GET", "/model-info") => model_info.clone(),
        ("POST", "/predict") => predict.clone(),
        ("GET", "/health") => Reply::ok(r#"{"status": "ok"}"#),
        _ => Reply::status("404 Not Found", "{}"),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = writer.write_all(response.as_bytes());
    let _ = writer.flush();
}

/// Model info in the shape the reference service produces.
pub const MODEL_INFO: &str = r#"{
    "selected_features": ["clump_thickness", "bare_nuclei", "mitoses"],
    "ranges": {
        "clump_thickness": {"min": 1.0, "max": 10.0},
        "bare_nuclei": {"min": 1.0, "max": 10.0}
    },
    "labels": {
        "clump_thickness": "Clump Thickness",
        "bare_nuclei": "Bare Nuclei"
    },
    "helptext": {
        "clump_thickness": "How thick the cell clumps appear (1-10)."
    },
    "presets": {
        "benign_typical": {"clump_thickness": 3.0, "bare_nuclei": 1.0},
        "malignant_typical": {"clump_thickness": 8.0, "bare_nuclei": 10.0, "mitoses": 2.0}
    },
    "note": "Examples are for testing the model only and are not medical advice."
}"#;
