// TODO: remove the unwrap below
pub fn first(v: &[u8]) -> u8 {
    *v.first().unwrap()
}
/* a block comment mentioning x.unwrap() */
