/// Implements [`Weight`](crate::Weight) for numeric edge values that can be
/// parsed from and written to an edge-list token.
macro_rules! impl_weight {
    ($($ty:ty),* $(,)*) => {
        $(
            impl $crate::Weight for $ty {
                const WEIGHTED: bool = true;

                fn parse_token(token: Option<&str>) -> Result<Self, String> {
                    let token = token.ok_or("No weight found!")?;
                    token
                        .parse::<$ty>()
                        .map_err(|e| format!("invalid weight '{}': {}", token, e))
                }

                fn to_token(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}
