/// Quote an SQLite identifier so table and column names taken from the
/// command line cannot change the statement.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
