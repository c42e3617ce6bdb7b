mod health;
mod rate_limit;
mod storage;
mod subscription;
