macro_rules! alias_lenient {
    ($alias:ident, $core:ident, $ret:ty) => {
        pub fn $alias(data: &[u8]) -> $ret {
            $core(data).unwrap_or_default()
        }
    };
}
