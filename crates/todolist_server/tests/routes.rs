use std::net::SocketAddr;
use std::path::Path;

use rusqlite::Connection;
use tempfile::TempDir;
use todolist_core::db::open_db;
use todolist_core::{Item, ListStore, SqliteListStore, SEED_ITEM_NAMES};
use todolist_server::{build_router, AppState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

struct TestServer {
    addr: SocketAddr,
    dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let conn = open_db(db_path(dir.path())).expect("open db");
        let app = build_router(AppState::new(conn));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
        Self { addr, dir }
    }

    /// Opens a second connection to inspect what the server persisted.
    fn inspect(&self) -> Connection {
        open_db(db_path(self.dir.path())).expect("open inspection connection")
    }

    async fn get(&self, path: &str) -> RawResponse {
        send_raw(self.addr, "GET", path, None).await
    }

    async fn post_form(&self, path: &str, form: &str) -> RawResponse {
        send_raw(self.addr, "POST", path, Some(form)).await
    }
}

fn db_path(dir: &Path) -> std::path::PathBuf {
    dir.join("todolist.sqlite3")
}

struct RawResponse {
    status: u16,
    head: String,
    body: String,
}

impl RawResponse {
    fn location(&self) -> Option<&str> {
        self.head.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("location").then(|| value.trim())
        })
    }
}

async fn send_raw(addr: SocketAddr, method: &str, path: &str, form: Option<&str>) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(body) = form {
        req.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
        req.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    } else {
        req.push_str("\r\n");
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}

fn default_items(conn: &Connection) -> Vec<Item> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM items ORDER BY seq;")
        .unwrap();
    let items = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            Ok(Item {
                id: id.parse().unwrap(),
                name: row.get(1)?,
            })
        })
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    items
}

fn list_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM lists;", [], |row| row.get(0))
        .unwrap()
}

#[tokio::test]
async fn first_visit_seeds_default_list_then_renders_today() {
    let server = TestServer::start().await;

    let first = server.get("/").await;
    assert_eq!(first.status, 303);
    assert_eq!(first.location(), Some("/"));

    let second = server.get("/").await;
    assert_eq!(second.status, 200);
    assert!(second.body.contains("<h1>Today</h1>"));
    assert!(second.body.contains("Welcome to your to-do-list."));
    assert!(second.body.contains("Hit the + button to add a new item."));
    assert!(second.body.contains("&lt;-- Hit this to delete an item."));
    assert_eq!(default_items(&server.inspect()).len(), SEED_ITEM_NAMES.len());
}

#[tokio::test]
async fn visiting_unknown_list_creates_it_once_with_seed_items() {
    let server = TestServer::start().await;

    let created = server.get("/shopping").await;
    assert_eq!(created.status, 303);
    assert_eq!(created.location(), Some("/shopping"));

    let rendered = server.get("/shopping").await;
    assert_eq!(rendered.status, 200);
    assert!(rendered.body.contains("<h1>Shopping</h1>"));
    assert!(rendered.body.contains("Welcome to your to-do-list."));

    let again = server.get("/SHOPPING").await;
    assert_eq!(again.status, 200);

    let conn = server.inspect();
    assert_eq!(list_count(&conn), 1);
    let list = SqliteListStore::new(&conn)
        .get_list("Shopping")
        .unwrap()
        .unwrap();
    let names: Vec<_> = list.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, SEED_ITEM_NAMES);
}

#[tokio::test]
async fn posting_to_today_adds_default_item() {
    let server = TestServer::start().await;

    let response = server.post_form("/", "newItem=Milk&list=Today").await;
    assert_eq!(response.status, 303);
    assert_eq!(response.location(), Some("/"));

    let items = default_items(&server.inspect());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Milk");

    let page = server.get("/").await;
    assert_eq!(page.status, 200);
    assert!(page.body.contains("<p>Milk</p>"));
}

#[tokio::test]
async fn blank_item_text_is_still_inserted() {
    let server = TestServer::start().await;

    let response = server.post_form("/", "newItem=&list=Today").await;
    assert_eq!(response.status, 303);

    let items = default_items(&server.inspect());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "");
}

#[tokio::test]
async fn posting_to_named_list_redirects_to_list() {
    let server = TestServer::start().await;
    server.get("/work").await;

    let response = server
        .post_form("/", "newItem=Write+report&list=Work")
        .await;
    assert_eq!(response.status, 303);
    assert_eq!(response.location(), Some("/work"));

    let page = server.get("/work").await;
    assert!(page.body.contains("<p>Write report</p>"));
}

#[tokio::test]
async fn posting_to_missing_list_is_reported_not_created() {
    let server = TestServer::start().await;

    let response = server.post_form("/", "newItem=Passport&list=Holiday").await;
    assert_eq!(response.status, 404);
    assert_eq!(list_count(&server.inspect()), 0);
}

#[tokio::test]
async fn deleting_item_from_named_list() {
    let server = TestServer::start().await;
    server.get("/shopping").await;
    let victim = SqliteListStore::new(&server.inspect())
        .get_list("Shopping")
        .unwrap()
        .unwrap()
        .items[0]
        .clone();

    let response = server
        .post_form("/delete", &format!("checkbox={}&listName=Shopping", victim.id))
        .await;
    assert_eq!(response.status, 303);
    assert_eq!(response.location(), Some("/shopping"));

    let remaining = SqliteListStore::new(&server.inspect())
        .get_list("Shopping")
        .unwrap()
        .unwrap()
        .items;
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|item| item.id != victim.id));
}

#[tokio::test]
async fn deleting_unknown_item_is_a_silent_noop() {
    let server = TestServer::start().await;
    server.post_form("/", "newItem=Milk&list=Today").await;
    server.get("/errands").await;
    let before = SqliteListStore::new(&server.inspect())
        .get_list("Errands")
        .unwrap();

    let ghost = Item::new("ghost").id;
    let today = server
        .post_form("/delete", &format!("checkbox={ghost}&listName=Today"))
        .await;
    assert_eq!(today.status, 303);
    assert_eq!(today.location(), Some("/"));

    let named = server
        .post_form("/delete", "checkbox=not-an-id&listName=Errands")
        .await;
    assert_eq!(named.status, 303);
    assert_eq!(named.location(), Some("/errands"));

    let conn = server.inspect();
    assert_eq!(default_items(&conn).len(), 1);
    assert_eq!(SqliteListStore::new(&conn).get_list("Errands").unwrap(), before);
}

#[tokio::test]
async fn deleting_default_item_redirects_home() {
    let server = TestServer::start().await;
    server.post_form("/", "newItem=Milk&list=Today").await;
    let milk = default_items(&server.inspect())[0].id;

    let response = server
        .post_form("/delete", &format!("checkbox={milk}&listName=Today"))
        .await;
    assert_eq!(response.status, 303);
    assert_eq!(response.location(), Some("/"));
    assert!(default_items(&server.inspect()).is_empty());
}

#[tokio::test]
async fn about_page_is_static() {
    let server = TestServer::start().await;

    let response = server.get("/about").await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("<h1>About</h1>"));
    assert_eq!(list_count(&server.inspect()), 0);
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let server = TestServer::start().await;
    server
        .inspect()
        .execute_batch("DROP TABLE lists;")
        .unwrap();

    let read = server.get("/shopping").await;
    assert_eq!(read.status, 500);

    let write = server.post_form("/", "newItem=Milk&list=Shopping").await;
    assert_eq!(write.status, 500);
}
