pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        site_domain: String,
        base_url: String,
    },
}
