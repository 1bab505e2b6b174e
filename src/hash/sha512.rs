use wolf_crypto_sys::{
    wc_Sha512,
    wc_Sha512Update, wc_Sha512Final,
    wc_InitSha512, wc_Sha512Copy, wc_Sha512Free,
};

make_api! {
    name: Sha512,
    wc: wc_Sha512,
    size: 64,
    block_size: 128,
    init: wc_InitSha512,
    update: wc_Sha512Update,
    finalize: wc_Sha512Final,
    copy: wc_Sha512Copy,
    free: wc_Sha512Free
}
