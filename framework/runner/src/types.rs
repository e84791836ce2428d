/// Recommended error type for scenario `main` functions and any shared code used by hooks. This
/// type is compatible with [crate::definition::HookResult] so `?` can be used to propagate errors.
pub type TimingsResult<T> = anyhow::Result<T>;
