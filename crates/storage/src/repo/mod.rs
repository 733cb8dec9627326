mod comments;
mod meta;
mod posts;
mod users;
