pub fn generated(x: Option<u8>) -> u8 {
    x.unwrap()
}
