#![forbid(unsafe_code)]

/// `embed_migrations!` is a proc-macro and cannot watch the migration
/// directory on its own, so adding or editing an `up.sql` would not rebuild
/// the crate. Telling cargo about the directory restores that.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
