pub mod moka;
pub mod redis;

/// 注册内置缓存后端
pub fn register_builtin_plugins() {
    self::moka::register();
    self::redis::register();
}
