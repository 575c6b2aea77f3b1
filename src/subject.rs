// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::config::CertificateRequest;
use rcgen::{DistinguishedName, DnType};

/// Build the subject distinguished name from the request fields, in the
/// fixed order country, state/province, locality, organization, common
/// name. Empty fields are skipped; non-empty values are taken verbatim
/// (the country code is not checked against ISO-3166). The same name
/// serves as both subject and issuer since the certificate is
/// self-signed.
pub fn distinguished_name(request: &CertificateRequest) -> DistinguishedName {
    let mut dn = DistinguishedName::new();

    let fields = [
        (DnType::CountryName, &request.country),
        (DnType::StateOrProvinceName, &request.state),
        (DnType::LocalityName, &request.city),
        (DnType::OrganizationName, &request.organization),
        (DnType::CommonName, &request.hostname),
    ];

    for (dn_type, value) in fields {
        if !value.is_empty() {
            dn.push(dn_type, value.as_str());
        }
    }

    dn
}
